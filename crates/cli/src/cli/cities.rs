use kledje::checkout::EGYPTIAN_CITIES;

#[expect(clippy::print_stdout, reason = "city list is command output")]
pub(crate) fn run() {
    for city in EGYPTIAN_CITIES {
        println!("{city}");
    }
}
