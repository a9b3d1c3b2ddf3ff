//! Password handling for CLI operations.

use rpassword::prompt_password;
use rasterlock::Password;

/// Returns the provided password, or prompts for one if required and not
/// supplied on the command line. Returns `None` on an empty prompt response
/// or I/O failure reading the terminal; the caller treats that as a fatal
/// `InvalidKey`.
pub fn get_or_prompt(provided: Option<String>) -> Option<Password> {
    if let Some(pwd) = provided {
        return Some(Password::new(pwd));
    }
    match prompt_password("Master password: ") {
        Ok(pwd) if !pwd.is_empty() => Some(Password::new(pwd)),
        _ => None,
    }
}
