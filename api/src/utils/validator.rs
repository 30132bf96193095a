use lazy_static::lazy_static;
use regex::Regex;

use crate::prelude::*;

lazy_static! {
	// something@something.tld, no whitespace
	static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
	// Anything but these is replaced in the ASCII Content-Disposition filename
	static ref UNSAFE_FILE_NAME_CHARACTERS: Regex = Regex::new(r#"[^A-Za-z0-9._\- ]"#).unwrap();
}

pub fn is_email_valid(email: &str) -> bool {
	email.len() <= 320 && EMAIL_REGEX.is_match(email)
}

pub fn is_keyword_name_valid(name: &str) -> bool {
	let name = name.trim();
	!name.is_empty() && name.chars().count() <= constants::MAX_KEYWORD_LENGTH
}

/// Checks the details every new account needs
pub fn check_new_account(name: &str, email: &str, password: &str) -> Result<(), ErrorType> {
	require_non_blank(name, "name")?;
	if !is_email_valid(email) {
		return Err(ErrorType::wrong_parameters("email is not valid"));
	}
	if password.chars().count() < constants::MIN_PASSWORD_LENGTH {
		return Err(ErrorType::wrong_parameters(format!(
			"password must be at least {} characters long",
			constants::MIN_PASSWORD_LENGTH
		)));
	}
	Ok(())
}

/// Returns the trimmed value, or a [`ErrorType::WrongParameters`] naming the
/// field if there is nothing left after trimming.
pub fn require_non_blank<'a>(value: &'a str, field: &str) -> Result<&'a str, ErrorType> {
	let value = value.trim();
	if value.is_empty() {
		Err(ErrorType::wrong_parameters(format!("{field} cannot be empty")))
	} else {
		Ok(value)
	}
}

/// Like [`require_non_blank`], for optional query parameters that a
/// particular endpoint needs anyway.
pub fn require_query<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ErrorType> {
	require_non_blank(value.as_deref().unwrap_or_default(), field)
}

/// Makes a user supplied filename safe to store and show back. Directory
/// components and control characters are dropped, everything else (CJK
/// included) is kept as is.
pub fn sanitize_file_name(name: &str) -> String {
	let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
	let cleaned = base
		.chars()
		.filter(|character| !character.is_control())
		.collect::<String>();
	let cleaned = cleaned.trim().trim_start_matches('.');

	if cleaned.is_empty() {
		"attachment".to_string()
	} else {
		cleaned.chars().take(255).collect()
	}
}

/// The `Content-Disposition` value to download a file as `name`. Clients that
/// only read `filename` get an ASCII approximation, the rest get the exact
/// name through the RFC 5987 `filename*` parameter.
pub fn content_disposition(name: &str) -> String {
	let fallback = UNSAFE_FILE_NAME_CHARACTERS.replace_all(name, "_");

	let mut encoded = String::with_capacity(name.len() * 3);
	for byte in name.bytes() {
		// RFC 5987 attr-char
		if byte.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&byte) {
			encoded.push(char::from(byte));
		} else {
			encoded.push_str(&format!("%{byte:02X}"));
		}
	}

	format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn emails() {
		assert!(is_email_valid("editor@journal.example"));
		assert!(!is_email_valid("editor@journal"));
		assert!(!is_email_valid("not an email@x.com"));
	}

	#[test]
	fn keyword_names_are_limited_by_characters_not_bytes() {
		assert!(is_keyword_name_valid("机器学习与深度神经网络的可解释性研究方法"));
		assert!(!is_keyword_name_valid("机器学习与深度神经网络的可解释性研究方法论"));
		assert!(!is_keyword_name_valid("   "));
	}

	#[test]
	fn file_names_lose_paths_and_control_characters() {
		assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
		assert_eq!(sanitize_file_name("C:\\docs\\paper.pdf"), "paper.pdf");
		assert_eq!(sanitize_file_name("final\r\n\u{0}.pdf"), "final.pdf");
		assert_eq!(sanitize_file_name("..."), "attachment");
	}

	#[test]
	fn chinese_file_names_survive() {
		assert_eq!(sanitize_file_name("论文终稿.pdf"), "论文终稿.pdf");
		assert_eq!(
			content_disposition("论文终稿.pdf"),
			"attachment; filename=\"____.pdf\"; \
			 filename*=UTF-8''%E8%AE%BA%E6%96%87%E7%BB%88%E7%A8%BF.pdf"
		);
	}

	#[test]
	fn content_disposition_cannot_be_broken_out_of() {
		assert_eq!(
			content_disposition("final\"; x.pdf"),
			"attachment; filename=\"final__ x.pdf\"; filename*=UTF-8''final%22%3B%20x.pdf"
		);
	}

	#[test]
	fn new_accounts_need_a_usable_password() {
		assert!(check_new_account("Ada", "ada@journal.example", "secret1").is_ok());
		assert!(check_new_account("Ada", "ada@journal.example", "short").is_err());
		assert!(check_new_account(" ", "ada@journal.example", "secret1").is_err());
		assert!(check_new_account("Ada", "ada", "secret1").is_err());
	}

	#[test]
	fn blank_values_name_the_field() {
		assert_eq!(
			require_non_blank("  ", "title").unwrap_err().message(),
			"title cannot be empty"
		);
		assert_eq!(require_non_blank(" x ", "title").unwrap(), "x");
	}
}
