use thiserror::Error;

/// A field of the listing that did not parse as a signed decimal
/// integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("bad program field {index}: {field:?}")]
pub struct ParseError {
    pub index: usize,
    pub field: String,
}

/// Parse a comma-separated decimal listing into a program image.
///
/// Whitespace around the listing and around individual fields is
/// tolerated, so a file read with its trailing newline parses as-is.
pub fn parse(text: &str) -> Result<Vec<i64>, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .enumerate()
        .map(|(index, field)| {
            let field = field.trim();
            field.parse().map_err(|_| ParseError {
                index,
                field: field.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_listing() {
        assert_eq!(parse("1,9,10,3,2,3,11,0,99,30,40,50").unwrap(), vec![
            1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50
        ]);
    }

    #[test]
    fn test_parse_negative_and_whitespace() {
        assert_eq!(parse(" 109, -1,\n204 ,2\n").unwrap(), vec![109, -1, 204, 2]);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse("").unwrap(), Vec::<i64>::new());
        assert_eq!(parse("  \n").unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn test_parse_reports_bad_field() {
        let err = parse("1,2,x,4").unwrap_err();
        assert_eq!(err.index, 2);
        assert_eq!(err.field, "x");
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        assert!(parse("1,,2").is_err());
    }
}
