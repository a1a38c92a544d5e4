//! Quote-aware splitting of a single CSV record line.

/// Fields of one record plus whether the line ended inside a quoted field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedRecord {
    pub fields: Vec<String>,
    pub unterminated: bool,
}

/// Split a record line on commas, honouring double-quoted fields.
///
/// A quote opens or closes a quoted section and is not emitted; `""` inside
/// a quoted section is a literal quote. The last field is always pushed, so a
/// trailing comma yields a trailing empty field. An unbalanced quote is
/// tolerated and reported through [`ParsedRecord::unterminated`].
pub fn parse_record(line: &str) -> ParsedRecord {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            other => field.push(other),
        }
    }
    fields.push(field);

    ParsedRecord { fields, unterminated: in_quotes }
}

/// Fields of `line`, ignoring quote balance.
pub fn split_record(line: &str) -> Vec<String> {
    parse_record(line).fields
}
