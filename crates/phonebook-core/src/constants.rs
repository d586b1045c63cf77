//! Global constants used throughout the phonebook codebase

/// Base62 character set used for store-minted record keys
pub const BASE62_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of a store-minted record key in characters
pub const RECORD_KEY_LENGTH: usize = 16;

/// Default exclusive upper bound for randomly drawn identifiers
pub const DEFAULT_RANDOM_ID_UPPER_BOUND: u64 = 1_000_000;

/// Attempts the document store makes to mint an unused key before giving up
pub const MAX_KEY_MINT_ATTEMPTS: usize = 8;

/// Error message returned when a draft lacks a name or number
pub const MISSING_FIELD_MESSAGE: &str = "Name or number missing";

/// Error message returned for routes that do not exist
pub const UNKNOWN_ENDPOINT_MESSAGE: &str = "Unknown endpoint";

/// Default HTTP port, as used by the original deployment
pub const DEFAULT_HTTP_PORT: u16 = 3001;

/// Sample contacts loaded when seeding is enabled
pub const SAMPLE_CONTACTS: [(&str, &str); 4] = [
    ("Arto Hellas", "040-123456"),
    ("Ada Lovelace", "39-44-5323523"),
    ("Dan Abramov", "12-43-234345"),
    ("Mary Poppendieck", "39-23-6423122"),
];
