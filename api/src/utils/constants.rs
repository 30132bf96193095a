use semver::Version;

/// The version of the database schema this binary creates and expects
pub const DATABASE_VERSION: Version = Version::new(0, 1, 0);

/// The `iss` claim of every access token issued by this server
pub const TOKEN_ISSUER: &str = "journal-api";

/// Argon2 memory cost, in KiB
pub const HASHING_MEMORY_COST: u32 = 8192;
/// Argon2 number of iterations
pub const HASHING_TIME_COST: u32 = 4;
/// Argon2 degree of parallelism
pub const HASHING_PARALLELISM: u32 = 4;

/// 50 MiB
pub const MAX_ATTACHMENT_SIZE: usize = 50 * 1024 * 1024;

/// Longest keyword name accepted, counted in characters
pub const MAX_KEYWORD_LENGTH: usize = 20;

/// Attachment extensions that can be uploaded, with the content types each of
/// them may be sent as.
pub const ALLOWED_ATTACHMENT_TYPES: &[(&str, &[&str])] = &[
	("jpg", &["image/jpeg"]),
	("jpeg", &["image/jpeg"]),
	("png", &["image/png"]),
	("gif", &["image/gif"]),
	("pdf", &["application/pdf"]),
	("doc", &["application/msword"]),
	(
		"docx",
		&["application/vnd.openxmlformats-officedocument.wordprocessingml.document"],
	),
	("xls", &["application/vnd.ms-excel"]),
	(
		"xlsx",
		&["application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"],
	),
	("ppt", &["application/vnd.ms-powerpoint"]),
	(
		"pptx",
		&["application/vnd.openxmlformats-officedocument.presentationml.presentation"],
	),
	("zip", &["application/zip", "application/x-zip-compressed"]),
];

/// Shortest password accepted for a new account
pub const MIN_PASSWORD_LENGTH: usize = 6;
