mod platform;
mod protocol;

fn main() {
    platform::run_service();
}
