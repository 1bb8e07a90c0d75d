use soroban_sdk::contracterror;

#[contracterror]
#[derive(Clone, Debug, Copy, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Initialization errors
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // Creation errors
    InvalidParameters = 10,
    DuplicateContract = 11,

    // Settlement errors
    NotFound = 20,
    InvalidPreimage = 21,
    AlreadyWithdrawn = 22,
    AlreadyRefunded = 23,
    Expired = 24,
    NotYetExpired = 25,

    // Authorization errors
    Unauthorized = 30,

    // Transfer errors
    FundingTransferFailed = 40,
}
