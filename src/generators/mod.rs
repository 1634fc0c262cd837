pub mod alphanumeric;
pub mod code_generator;
pub mod hasher;
pub mod token;
pub mod traits;

pub use alphanumeric::{AlphanumericGenerator, DEFAULT_CODE_LENGTH};
pub use code_generator::CodeGenerator;
pub use hasher::{BcryptHasher, HashedPassword, PasswordHasher};
pub use token::{make_token, new_uuid, IssuedToken, TokenData};
pub use traits::ValueGenerator;
