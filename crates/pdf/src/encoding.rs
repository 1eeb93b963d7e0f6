//! WinAnsi encoding and Helvetica metrics

/// Helvetica advance widths for 0x20..=0x7E, in 1/1000 em
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Helvetica-Bold is roughly this much wider than the regular face
const BOLD_FACTOR: f32 = 1.06;

const DEFAULT_WIDTH: u16 = 556;

const REPLACEMENT: u8 = b'?';

fn win_ansi(c: char) -> Option<u8> {
    let byte = match c {
        ' '..='~' => c as u8,
        '\u{a0}'..='\u{ff}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        '„' => 0x84,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        _ => return None,
    };
    Some(byte)
}

/// Encode `text` for a WinAnsi Type1 font
pub fn encode(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '₹' => out.extend_from_slice(b"Rs."),
            '\t' | '\n' | '\r' => out.push(b' '),
            _ => out.push(win_ansi(c).unwrap_or(REPLACEMENT)),
        }
    }
    out
}

fn byte_width(byte: u8) -> u16 {
    match byte {
        0x20..=0x7e => HELVETICA[(byte - 0x20) as usize],
        _ => DEFAULT_WIDTH,
    }
}

/// Rendered width of `text` in points
pub fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let units: u32 = encode(text).into_iter().map(|b| byte_width(b) as u32).sum();
    let width = units as f32 * size / 1000.0;
    if bold {
        width * BOLD_FACTOR
    } else {
        width
    }
}

/// Greedy word wrap to `max_width` points.
///
/// Words wider than a whole line are broken between characters. Always yields
/// at least one line.
pub fn wrap(text: &str, size: f32, bold: bool, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, size, bold) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if text_width(word, size, bold) <= max_width {
            current = word.to_string();
        } else {
            for c in word.chars() {
                current.push(c);
                if text_width(&current, size, bold) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
