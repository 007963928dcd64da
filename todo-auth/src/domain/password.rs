use crate::validation::is_valid_password;

#[derive(PartialEq, Debug, Clone)]
pub struct Password(String);

impl Password {
    pub fn parse(password: String) -> Result<Password, String> {
        match is_valid_password(&password) {
            true => Ok(Password(password)),
            false => Err("Password is not valid, must be between 8 and 128 characters long, contain at least one uppercase letter and one special character.".to_owned()),
        }
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
