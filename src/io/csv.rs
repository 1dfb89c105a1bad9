// Minimal CSV cell handling for the study tables (no embedded newlines)

const DELIM: char = ',';
const QUOTE: char = '"';

/// Quote a cell only when it contains the delimiter or a quote
pub fn quote_cell(cell: &str) -> String {
    if !cell.contains(DELIM) && !cell.contains(QUOTE) {
        return cell.to_string();
    }
    format!("{}{}{}", QUOTE, cell.replace(QUOTE, "\"\""), QUOTE)
}

pub fn join_record<I, S>(cells: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    cells
        .into_iter()
        .map(|c| quote_cell(c.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Split one CSV line into cells, honoring quoted cells and doubled quotes
pub fn split_record(line: &str) -> Result<Vec<String>, String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = line.trim_end_matches(|c: char| c == '\r' || c == '\n').chars().peekable();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == QUOTE {
                if chars.peek() == Some(&QUOTE) {
                    cell.push(QUOTE);
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                cell.push(c);
            }
        } else if c == QUOTE && cell.is_empty() {
            in_quotes = true;
        } else if c == DELIM {
            cells.push(std::mem::take(&mut cell));
        } else {
            cell.push(c);
        }
    }

    if in_quotes {
        return Err("unterminated quoted cell".to_string());
    }
    cells.push(cell);
    Ok(cells)
}
