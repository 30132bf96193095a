use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

/// Declares a unit struct that always (de)serializes as the given boolean
/// literal. Used for the `success` flag of response bodies, so that a success
/// body can never be parsed from an error response and vice versa.
macro_rules! constant_bool {
	($(#[$meta:meta])* $name:ident => $value:literal) => {
		$(#[$meta])*
		#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
		pub struct $name;

		impl $name {
			/// The boolean this type stands for
			pub const VALUE: bool = $value;
		}

		impl<'de> Deserialize<'de> for $name {
			fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
			where
				D: Deserializer<'de>,
			{
				if bool::deserialize(deserializer)? == $value {
					Ok($name)
				} else {
					Err(D::Error::custom(concat!("bool is not ", stringify!($value))))
				}
			}
		}

		impl Serialize for $name {
			fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
			where
				S: Serializer,
			{
				serializer.serialize_bool($value)
			}
		}

		impl From<$name> for bool {
			fn from(_: $name) -> Self {
				$value
			}
		}
	};
}

constant_bool! {
	/// A type that can be used to represent a constant `true` boolean.
	True => true
}

constant_bool! {
	/// A type that can be used to represent a constant `false` boolean.
	False => false
}

#[cfg(test)]
mod tests {
	use serde_test::{assert_de_tokens_error, assert_tokens, Token};

	use super::{False, True};

	#[test]
	fn assert_true_types() {
		assert_tokens(&True, &[Token::Bool(true)]);
	}

	#[test]
	fn assert_false_types() {
		assert_tokens(&False, &[Token::Bool(false)]);
	}

	#[test]
	fn true_rejects_false() {
		assert_de_tokens_error::<True>(&[Token::Bool(false)], "bool is not true");
	}
}
