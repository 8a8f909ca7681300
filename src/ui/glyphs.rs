use std::env;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyphs {
    pub ok: &'static str,
    pub fail: &'static str,
    pub cursor: &'static str,
}

pub fn select(fancy_requested: bool) -> Glyphs {
    if fancy_requested {
        fancy()
    } else {
        ascii()
    }
}

/// Fancy glyphs on Windows or when the locale advertises UTF-8.
pub fn detect() -> Glyphs {
    let utf8_locale = ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.is_empty())
        .is_some_and(|value| {
            let value = value.to_ascii_lowercase();
            value.contains("utf-8") || value.contains("utf8")
        });
    select(cfg!(windows) || utf8_locale)
}

fn ascii() -> Glyphs {
    Glyphs {
        ok: "+",
        fail: "-",
        cursor: ">",
    }
}

fn fancy() -> Glyphs {
    Glyphs {
        ok: "✓",
        fail: "✗",
        cursor: "❯",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select() {
        assert_eq!(select(false).ok, "+");
        assert_eq!(select(false).fail, "-");
        assert_eq!(select(true).ok, "✓");
        assert_eq!(select(true).fail, "✗");
    }
}
