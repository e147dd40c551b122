use super::{Error, Result};

/// Pattern read from an RLE file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RlePattern {
    /// Width declared in the header.
    pub width: u32,
    /// Height declared in the header.
    pub height: u32,
    /// Alive cells as `[row, col]`, relative to the top-left corner.
    pub alive: Vec<[u32; 2]>,
}

/// Parses the RLE format (`#` comments, `x = W, y = H[, rule = B3/S23]` header,
/// then `b`/`o`/`$` runs terminated by `!`).
pub fn parse_rle(data: &[u8]) -> Result<RlePattern> {
    let parse_next_number = |i: &mut usize| -> Result<u32> {
        while *i < data.len() && !data[*i].is_ascii_digit() {
            if data[*i] == b'\n' {
                return Err(Error::Rle("missing number in header".to_owned()));
            }
            *i += 1;
        }
        let j = {
            let mut j = *i;
            while j < data.len() && data[j].is_ascii_digit() {
                j += 1;
            }
            j
        };
        if *i == j {
            return Err(Error::Rle("unexpected end of input".to_owned()));
        }
        let ans = std::str::from_utf8(&data[*i..j])
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .ok_or_else(|| Error::Rle("number is too large".to_owned()))?;
        *i = j;
        Ok(ans)
    };

    let mut i = 0;
    // skipping comment and blank lines
    while i < data.len() && (data[i] == b'#' || data[i].is_ascii_whitespace()) {
        if data[i] == b'#' {
            while i < data.len() && data[i] != b'\n' {
                i += 1;
            }
        }
        i += 1;
    }
    if i >= data.len() || data[i] != b'x' {
        return Err(Error::Rle("header line must start with 'x'".to_owned()));
    }
    let header_end = data[i..]
        .iter()
        .position(|&c| c == b'\n')
        .map_or(data.len(), |p| i + p);
    let header = std::str::from_utf8(&data[i..header_end])
        .map_err(|_| Error::Rle("header is not valid UTF-8".to_owned()))?;
    check_rule(header)?;
    let width = parse_next_number(&mut i)?;
    let height = parse_next_number(&mut i)?;
    i = header_end;

    let mut alive = Vec::new();
    let (mut x, mut y, mut cnt) = (0u32, 0u32, 1u32);
    let mut terminated = false;
    while i < data.len() {
        match data[i] {
            b'0'..=b'9' => {
                cnt = parse_next_number(&mut i)?;
                continue;
            }
            b'o' => {
                let end = x
                    .checked_add(cnt)
                    .filter(|&end| end <= width && y < height)
                    .ok_or_else(|| {
                        Error::Rle(format!(
                            "row {y} exceeds the declared {width}x{height} bounds"
                        ))
                    })?;
                alive.extend((x..end).map(|col| [y, col]));
                (x, cnt) = (end, 1);
            }
            b'b' => {
                x = x.checked_add(cnt).filter(|&end| end <= width).ok_or_else(|| {
                    Error::Rle(format!("row {y} is wider than the declared width {width}"))
                })?;
                cnt = 1;
            }
            b'$' => {
                y = y.checked_add(cnt).filter(|&end| end <= height).ok_or_else(|| {
                    Error::Rle(format!(
                        "pattern is taller than the declared height {height}"
                    ))
                })?;
                (x, cnt) = (0, 1);
            }
            b'!' => {
                terminated = true;
                break;
            }
            c if c.is_ascii_whitespace() => {}
            c => {
                return Err(Error::Rle(format!(
                    "unexpected symbol {:?}",
                    char::from(c)
                )))
            }
        }
        i += 1;
    }
    if !terminated {
        return Err(Error::Rle("missing terminating '!'".to_owned()));
    }
    Ok(RlePattern {
        width,
        height,
        alive,
    })
}

fn check_rule(header: &str) -> Result<()> {
    let Some(rule) = header
        .split(',')
        .filter_map(|kv| kv.split_once('='))
        .find(|(k, _)| k.trim() == "rule")
        .map(|(_, v)| v.trim())
    else {
        return Ok(());
    };
    if rule.eq_ignore_ascii_case("B3/S23") || rule == "23/3" {
        Ok(())
    } else {
        Err(Error::Rle(format!("unsupported rule {rule}")))
    }
}
