use regex::Regex;
use serde_json::Value;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

fn is_valid_email(email: &str) -> bool {
  Regex::new(EMAIL_PATTERN).unwrap().is_match(email)
}

fn is_valid_username(username: &str) -> bool {
  username.len() >= 3 && username.len() <= 255
}

/// Checks a create payload: `username`, `email` and `password` must all be
/// present as strings, the email must match the pattern, the username must
/// be 3-255 bytes and the password at least 6.
pub fn validate_create(payload: &Value) -> bool {
  let (Some(username), Some(email), Some(password)) = (
    payload.get("username").and_then(Value::as_str),
    payload.get("email").and_then(Value::as_str),
    payload.get("password").and_then(Value::as_str),
  ) else {
    return false;
  };

  is_valid_email(email) && is_valid_username(username) && password.len() >= 6
}

/// Checks an update payload: only keys that are present are validated,
/// absent fields pass (partial update).
pub fn validate_update(payload: &Value) -> bool {
  if let Some(email) = payload.get("email") {
    match email.as_str() {
      Some(email) if is_valid_email(email) => {}
      _ => return false,
    }
  }

  if let Some(username) = payload.get("username") {
    match username.as_str() {
      Some(username) if is_valid_username(username) => {}
      _ => return false,
    }
  }

  true
}
