const MAX_FIELD_CHARS: usize = 512;

#[derive(Clone, Copy)]
enum Escape {
    Start,
    Csi,
    Osc,
    OscEsc,
    /// DCS, SOS, PM and APC payloads, ended by `ESC \`.
    StString,
    StEsc,
}

/// Cleans text read from user files before it reaches the terminal.
///
/// Escape sequences, control characters and bidi overrides are dropped, tabs
/// become a single space, and the result is trimmed and capped.
pub fn sanitize_display_text(input: &str) -> String {
    sanitize_line(input).trim().to_string()
}

/// Like [`sanitize_display_text`] but keeps leading and trailing spaces, for
/// text where alignment matters (icon art).
pub fn sanitize_line(input: &str) -> String {
    let mut out = String::with_capacity(input.len().min(MAX_FIELD_CHARS));
    let mut escape: Option<Escape> = None;
    let mut count = 0usize;

    for c in input.chars() {
        if let Some(mode) = escape {
            escape = match (mode, c) {
                (Escape::Start, '[') => Some(Escape::Csi),
                (Escape::Start, ']') => Some(Escape::Osc),
                (Escape::Start, 'P' | 'X' | '^' | '_') => Some(Escape::StString),
                (Escape::Start, _) => None,
                (Escape::Csi, '@'..='~') => None,
                (Escape::Csi, _) => Some(Escape::Csi),
                (Escape::Osc, '\x07') => None,
                (Escape::Osc, '\x1b') => Some(Escape::OscEsc),
                (Escape::Osc, _) => Some(Escape::Osc),
                (Escape::OscEsc, '\\') => None,
                (Escape::OscEsc, _) => Some(Escape::Osc),
                (Escape::StString, '\x1b') => Some(Escape::StEsc),
                (Escape::StString, _) => Some(Escape::StString),
                (Escape::StEsc, '\\') => None,
                (Escape::StEsc, '\x1b') => Some(Escape::StEsc),
                (Escape::StEsc, _) => Some(Escape::StString),
            };
            continue;
        }

        match c {
            '\x1b' => escape = Some(Escape::Start),
            '\t' => {
                out.push(' ');
                count += 1;
            }
            c if c.is_control() || is_bidi_control(c) => {}
            c => {
                out.push(c);
                count += 1;
            }
        }

        if count >= MAX_FIELD_CHARS {
            break;
        }
    }

    out
}

fn is_bidi_control(c: char) -> bool {
    matches!(c, '\u{061C}' | '\u{200E}' | '\u{200F}')
        || ('\u{202A}'..='\u{202E}').contains(&c)
        || ('\u{2066}'..='\u{2069}').contains(&c)
}
