use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    /// Inbound entrypoint called by something other than the endpoint
    #[error("illegal access")]
    UnauthorizedCaller,

    /// Inbound source address is empty
    #[error("illegal address")]
    IllegalAddress,

    /// Inbound (chain, address) does not match the trusted remote entry
    #[error("invalid source sending contract")]
    UntrustedSource,

    /// No trusted remote registered for the destination chain
    #[error("destination chain is not a trusted source")]
    ChannelNotTrusted,

    /// Attached funds do not cover the endpoint's quoted fee
    #[error("must send enough value to cover the message fee")]
    InsufficientValue,

    /// Deliver entrypoint called from outside the contract
    #[error("caller must be the internal dispatcher")]
    NotDispatcher,

    /// Retry for a key with no pending failure record
    #[error("no stored message")]
    NoStoredMessage,

    /// Retry payload does not hash to the stored digest
    #[error("invalid payload")]
    PayloadMismatch,

    /// Transfer payload bytes do not follow the wire format
    #[error("could not parse transfer payload")]
    InvalidTransferPayload,

    /// Only 128-bit amounts are supported
    #[error("amount exceeds 128 bits")]
    AmountTooHigh,

    /// Recipient bytes do not decode to a local address
    #[error("invalid recipient address")]
    InvalidRecipient,

    /// Caller has no rights over the token being spent
    #[error("caller is not owner nor approved")]
    NotOwnerOrApproved,

    /// Caller lacks the required role; message kept OpenZeppelin-compatible
    #[error("AccessControl: account {account} is missing role {role}")]
    MissingRole { account: String, role: String },
}

impl ContractError {
    pub fn std(&self) -> StdError {
        StdError::GenericErr {
            msg: format!("{self}"),
        }
    }

    pub fn std_err<T>(&self) -> Result<T, StdError> {
        Err(self.std())
    }
}
