/* 📖 # Why does payroll take no arguments?

The service prints the greeting for a fixed recipient and nothing else. Without flags,
environment lookups or configuration there is exactly one observable behavior: one line on
stdout and exit status 0. Diagnostics go to stderr so they can never alter that line.
*/

use heustics_base::tracing::{LevelFilter, init_tracing};
use tracing::debug;

const RECIPIENT: &str = "Mr. Yogi";

fn main() {
    if let Err(e) = init_tracing(LevelFilter::WARN) {
        eprintln!("Warning: {}", e);
    }

    let msg = create_msg(RECIPIENT);
    debug!(recipient = RECIPIENT, "printing greeting");
    println!("{}", msg);
}

fn create_msg(name: &str) -> String {
    helloworld::create_msg(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_msg() {
        assert_eq!(create_msg("Tester"), "Howdy Doo Tester!");
    }

    #[test]
    fn test_create_msg_matches_library() {
        assert_eq!(create_msg(RECIPIENT), helloworld::create_msg(RECIPIENT));
    }
}
