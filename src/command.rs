//! Turns a line of user input into a [`Command`], rejecting anything that
//! should never reach the map.
//!
//! Both a shell-ish form and a call form are accepted:
//!
//! ```text
//! put 19 Apple
//! put(19, "Apple")
//! containsKey 19
//! keySet
//! ```

use crate::{error::InputError, Key};

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Put { key: Key, value: String },
    Get(Key),
    Remove(Key),
    ContainsKey(Key),
    KeySet,
    Values,
    Reset,
    /// Redraw without changing anything.
    Show,
    /// Explain where a key would be routed.
    Hash(Key),
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, InputError> {
        let mut tokens = tokenize(line)?.into_iter();

        let op = match tokens.next() {
            Some(op) => op,
            None => return Err(InputError::UnknownOperation(String::new())),
        };

        let command = match op.to_ascii_lowercase().as_str() {
            "put" => {
                // the value is a single token; quote it to keep spaces or commas
                let (key, value) = match (tokens.next(), tokens.next()) {
                    (Some(key), Some(value)) if !key.is_empty() && !value.is_empty() => {
                        (key, value)
                    }
                    _ => return Err(InputError::MissingKeyOrValue),
                };

                Command::Put {
                    key: parse_key(&key)?,
                    value,
                }
            }
            "get" => Command::Get(next_key(&mut tokens)?),
            "remove" => Command::Remove(next_key(&mut tokens)?),
            "containskey" | "contains" => Command::ContainsKey(next_key(&mut tokens)?),
            "hash" => Command::Hash(next_key(&mut tokens)?),
            "keyset" | "keys" => Command::KeySet,
            "values" => Command::Values,
            "reset" | "clear" => Command::Reset,
            "show" => Command::Show,
            _ => return Err(InputError::UnknownOperation(op)),
        };

        match tokens.next() {
            Some(extra) => Err(InputError::UnexpectedArgument(extra)),
            None => Ok(command),
        }
    }
}

fn next_key(tokens: &mut impl Iterator<Item = String>) -> Result<Key, InputError> {
    match tokens.next() {
        Some(key) if !key.is_empty() => parse_key(&key),
        _ => Err(InputError::MissingKey),
    }
}

/// Keys are whole decimal integers, optionally signed.
pub fn parse_key(token: &str) -> Result<Key, InputError> {
    token
        .trim()
        .parse::<Key>()
        .map_err(|_| InputError::KeyNotNumeric(token.to_owned()))
}

/// Splits on whitespace, parentheses and commas. Double quotes group text,
/// spaces included, and `""` yields an empty token.
fn tokenize(line: &str) -> Result<Vec<String>, InputError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                let mut closed = false;
                for q in chars.by_ref() {
                    if q == '"' {
                        closed = true;
                        break;
                    }
                    current.push(q);
                }

                if !closed {
                    return Err(InputError::UnterminatedQuote(line.trim().to_owned()));
                }
                in_token = true;
            }
            c if c.is_whitespace() || c == '(' || c == ')' || c == ',' => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::{tokenize, Command};
    use crate::error::InputError;

    #[test]
    fn both_syntaxes_parse() {
        let expected = Command::Put {
            key: 19,
            value: "Apple".to_owned(),
        };

        assert_eq!(Ok(expected.clone()), Command::parse("put 19 Apple"));
        assert_eq!(Ok(expected.clone()), Command::parse("put(19, \"Apple\")"));
        assert_eq!(Ok(expected), Command::parse("  PUT 19   Apple  "));

        assert_eq!(Ok(Command::ContainsKey(14)), Command::parse("containsKey(14)"));
        assert_eq!(Ok(Command::KeySet), Command::parse("keySet()"));
        assert_eq!(Ok(Command::Values), Command::parse("values"));
        assert_eq!(Ok(Command::Reset), Command::parse("reset"));
        assert_eq!(Ok(Command::Hash(-12)), Command::parse("hash -12"));
    }

    #[test]
    fn quoted_values_keep_spaces() {
        assert_eq!(
            Ok(Command::Put {
                key: 12,
                value: "Big Cat".to_owned()
            }),
            Command::parse("put 12 \"Big Cat\"")
        );
        assert_eq!(
            vec!["put".to_owned(), "1".to_owned(), String::new()],
            tokenize("put 1 \"\"").unwrap()
        );
    }

    #[test]
    fn missing_pieces_are_rejected() {
        assert_eq!(Err(InputError::MissingKeyOrValue), Command::parse("put"));
        assert_eq!(Err(InputError::MissingKeyOrValue), Command::parse("put 12"));
        assert_eq!(Err(InputError::MissingKeyOrValue), Command::parse("put 12 \"\""));
        assert_eq!(Err(InputError::MissingKey), Command::parse("get"));
        assert_eq!(Err(InputError::MissingKey), Command::parse("remove(\"\")"));
        assert_eq!(Err(InputError::MissingKeyOrValue), Command::parse("put 12 \"\" Cat"));
        assert_eq!(
            Err(InputError::MissingKeyOrValue),
            Command::parse("put(12, \"\", \"Cat\")")
        );
    }

    #[test]
    fn put_takes_exactly_one_value() {
        assert_eq!(
            Err(InputError::UnexpectedArgument("Jr".to_owned())),
            Command::parse("put 12 Fox,Jr")
        );
        assert_eq!(
            Err(InputError::UnexpectedArgument("Cat".to_owned())),
            Command::parse("put 12 Big Cat")
        );
        assert_eq!(
            Ok(Command::Put {
                key: 12,
                value: "Fox,Jr".to_owned()
            }),
            Command::parse("put(12, \"Fox,Jr\")")
        );
    }

    #[test]
    fn bad_keys_and_operations_are_rejected() {
        assert_eq!(
            Err(InputError::KeyNotNumeric("twelve".to_owned())),
            Command::parse("get twelve")
        );
        assert_eq!(
            Err(InputError::KeyNotNumeric("1.5".to_owned())),
            Command::parse("put 1.5 Apple")
        );
        assert_eq!(
            Err(InputError::UnknownOperation("frob".to_owned())),
            Command::parse("frob 1")
        );
        assert_eq!(
            Err(InputError::UnexpectedArgument("13".to_owned())),
            Command::parse("get 12 13")
        );
        assert!(matches!(
            Command::parse("put 12 \"Cat"),
            Err(InputError::UnterminatedQuote(_))
        ));
    }
}
