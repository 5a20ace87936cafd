//! Probe session identity.
//!
//! A session is a client-chosen opaque identifier plus the test phone number
//! used as the login credential. The server binds its own state to the
//! identifier at login time; nothing is persisted on this side.

use tracing::warn;

/// Phone numbers present in the dev server's test data set.
///
/// Logging in with any other number is allowed, but the server will have no
/// data to return for it.
pub const TEST_PHONE_NUMBERS: [&str; 16] = [
    "1111111111",
    "2222222222",
    "3333333333",
    "4444444444",
    "5555555555",
    "6666666666",
    "7777777777",
    "8888888888",
    "9999999999",
    "1010101010",
    "1212121212",
    "1313131313",
    "1414141414",
    "2020202020",
    "2121212121",
    "2525252525",
];

/// Session identity sent to the server at login.
///
/// Lives for the duration of the process; never renewed or expired by the
/// client.
#[derive(Debug, Clone)]
pub struct Session {
    /// Client-chosen opaque identifier correlating login and later calls.
    session_id: String,
    /// Test credential; should be one of [`TEST_PHONE_NUMBERS`].
    phone_number: String,
}

impl Session {
    /// Create a new session identity.
    ///
    /// A phone number outside the known test set is accepted with a warning.
    pub fn new(session_id: impl Into<String>, phone_number: impl Into<String>) -> Self {
        let session_id = session_id.into();
        let phone_number = phone_number.into();

        if !Self::is_test_number(&phone_number) {
            warn!(
                phone_number = %phone_number,
                "phone number is not in the test data set; the server may have nothing for it"
            );
        }

        Self {
            session_id,
            phone_number,
        }
    }

    /// Whether the given number is in the dev server's test data set.
    pub fn is_test_number(number: &str) -> bool {
        TEST_PHONE_NUMBERS.contains(&number)
    }

    /// Get the session identifier.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Get the phone number credential.
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }
}
