pub mod cmd {
    pub const MODEL: &str = "smartinvo model";
    pub const HEALTH: &str = "smartinvo health";
    pub const STEPS: &str = "smartinvo steps";
    pub const CONFIG_INIT: &str = "smartinvo config init";
    pub const CONFIG_SHOW: &str = "smartinvo config show";
}

pub mod fmt {
    pub fn stats(city: &str) -> String {
        format!("smartinvo stats --city {}", quote(city))
    }

    pub fn weather(city: &str) -> String {
        format!("smartinvo weather --city {}", quote(city))
    }

    pub fn shelf_life(item: &str) -> String {
        format!("smartinvo shelf-life {}", quote(item))
    }

    fn quote(value: &str) -> String {
        if value.contains(char::is_whitespace) {
            format!("\"{}\"", value)
        } else {
            value.to_string()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_quotes_values_with_spaces() {
            assert_eq!(stats("Singapore"), "smartinvo stats --city Singapore");
            assert_eq!(weather("São Paulo"), "smartinvo weather --city \"São Paulo\"");
        }
    }
}
