pub mod password;
pub mod token;
pub mod validation;

pub use password::PasswordHasher;
pub use token::generate_key;
pub use validation::Validator;
