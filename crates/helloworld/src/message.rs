/// Returns the greeting message for `name`.
///
/// # Examples
///
/// ```
/// assert_eq!(helloworld::create_msg("Tester"), "Howdy Doo Tester!");
/// ```
pub fn create_msg(name: &str) -> String {
    format!("Howdy Doo {}!", name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn test_create_msg() {
        assert_eq!(create_msg("Tester"), "Howdy Doo Tester!");
    }

    #[test]
    fn test_create_msg_empty_name() {
        assert_eq!(create_msg(""), "Howdy Doo !");
    }

    #[test]
    fn test_create_msg_is_plain_concatenation() {
        for name in ["Mr. Yogi", " padded ", "{}", "%s", "Zoë", "line\nbreak"] {
            assert_eq!(create_msg(name), format!("{}{}{}", "Howdy Doo ", name, "!"));
        }
    }

    #[test]
    fn test_create_msg_service_name() {
        expect!["Howdy Doo Mr. Yogi!"].assert_eq(&create_msg("Mr. Yogi"));
    }
}
