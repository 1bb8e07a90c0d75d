#![no_std]

mod errors;
mod events;
mod storage;
mod types;

pub use errors::Error;
use events::*;
use soroban_sdk::{contract, contractimpl, log, token, xdr::ToXdr, Address, Bytes, BytesN, Env};
use storage::*;
pub use types::*;

/// Hash Time Locked Contract registry
/// Escrows SEP-41 tokens behind a hashlock and a timelock. The receiver side
/// claims with the preimage before expiry, the sender reclaims after it.
#[contract]
pub struct HtlcContract;

#[contractimpl]
impl HtlcContract {
    /// Initialize the registry with the digest used for hashlocks
    pub fn initialize(env: Env, hash_algorithm: HashAlgorithm) -> Result<(), Error> {
        if has_hash_algorithm(&env) {
            return Err(Error::AlreadyInitialized);
        }

        set_hash_algorithm(&env, hash_algorithm);
        bump_instance(&env);
        emit_initialized(&env, hash_algorithm);

        Ok(())
    }

    // ============ Lock Functions ============

    /// Lock `amount` of `token` for `receiver`
    /// The sender must have approved this contract for at least `amount`.
    pub fn new_contract(
        env: Env,
        sender: Address,
        receiver: Address,
        hashlock: BytesN<32>,
        timelock: u64,
        token: Address,
        amount: i128,
    ) -> Result<BytesN<32>, Error> {
        sender.require_auth();
        get_hash_algorithm(&env)?;
        bump_instance(&env);

        // Validate
        if amount <= 0 {
            return Err(Error::InvalidParameters);
        }
        if receiver == sender {
            return Err(Error::InvalidParameters);
        }
        if timelock <= env.ledger().timestamp() {
            return Err(Error::InvalidParameters);
        }

        let terms = ContractTerms {
            sender,
            receiver,
            token,
            amount,
            hashlock,
            timelock,
        };
        let contract_id = derive_contract_id(&env, &terms);
        if has_contract(&env, &contract_id) {
            return Err(Error::DuplicateContract);
        }

        // Pull tokens from sender into escrow
        pull_funds(&env, &terms.token, &terms.sender, terms.amount)?;

        set_contract(&env, &contract_id, &StoredContract::new(terms.clone()));

        emit_htlc_new(
            &env,
            contract_id.clone(),
            terms.sender,
            terms.receiver,
            terms.token,
            terms.amount,
            terms.hashlock,
            terms.timelock,
        );

        Ok(contract_id)
    }

    /// Release a lock to its receiver
    /// Anyone holding the preimage may call this; funds always go to the
    /// recorded receiver.
    pub fn withdraw(env: Env, contract_id: BytesN<32>, preimage: BytesN<32>) -> Result<(), Error> {
        bump_instance(&env);

        let mut record = get_contract(&env, &contract_id)?;

        let algorithm = get_hash_algorithm(&env)?;
        if hash_preimage(&env, algorithm, &preimage) != record.terms.hashlock {
            return Err(Error::InvalidPreimage);
        }

        ensure_unsettled(&record.state)?;

        // Check timelock
        if env.ledger().timestamp() >= record.terms.timelock {
            return Err(Error::Expired);
        }

        // Update state
        record.state = ContractState::Withdrawn(preimage.clone());
        set_contract(&env, &contract_id, &record);

        // Release escrow
        push_funds(&env, &record.terms.token, &record.terms.receiver, record.terms.amount)?;

        log!(&env, "htlc withdrawn: receiver={}, amount={}", record.terms.receiver, record.terms.amount);
        emit_htlc_withdraw(&env, contract_id, record.terms.receiver, preimage);

        Ok(())
    }

    /// Return an expired lock to its sender
    pub fn refund(env: Env, caller: Address, contract_id: BytesN<32>) -> Result<(), Error> {
        caller.require_auth();
        bump_instance(&env);

        let mut record = get_contract(&env, &contract_id)?;

        ensure_unsettled(&record.state)?;

        // Check timelock
        if env.ledger().timestamp() < record.terms.timelock {
            return Err(Error::NotYetExpired);
        }

        // Check caller
        if caller != record.terms.sender {
            return Err(Error::Unauthorized);
        }

        // Update state
        record.state = ContractState::Refunded;
        set_contract(&env, &contract_id, &record);

        // Transfer tokens back
        push_funds(&env, &record.terms.token, &record.terms.sender, record.terms.amount)?;

        log!(&env, "htlc refunded: sender={}, amount={}", record.terms.sender, record.terms.amount);
        emit_htlc_refund(&env, contract_id, record.terms.sender, record.terms.amount);

        Ok(())
    }

    // ============ View Functions ============

    /// Get lock details
    pub fn get_contract(env: Env, contract_id: BytesN<32>) -> Result<LockContract, Error> {
        let record = get_contract(&env, &contract_id)?;
        Ok(record.to_public(&env, contract_id))
    }

    /// Check if a lock exists
    pub fn has_contract(env: Env, contract_id: BytesN<32>) -> bool {
        has_contract(&env, &contract_id)
    }

    /// Recompute the id `new_contract` would assign to these terms
    pub fn compute_contract_id(
        env: Env,
        sender: Address,
        receiver: Address,
        token: Address,
        amount: i128,
        hashlock: BytesN<32>,
        timelock: u64,
    ) -> BytesN<32> {
        let terms = ContractTerms {
            sender,
            receiver,
            token,
            amount,
            hashlock,
            timelock,
        };
        derive_contract_id(&env, &terms)
    }

    /// Get the configured hashlock digest
    pub fn hash_algorithm(env: Env) -> Result<HashAlgorithm, Error> {
        get_hash_algorithm(&env)
    }
}

// ============ Helper Functions ============

fn ensure_unsettled(state: &ContractState) -> Result<(), Error> {
    match state {
        ContractState::Created => Ok(()),
        ContractState::Withdrawn(_) => Err(Error::AlreadyWithdrawn),
        ContractState::Refunded => Err(Error::AlreadyRefunded),
    }
}

/// Pull escrow from `from` using the allowance granted to this contract
fn pull_funds(env: &Env, token: &Address, from: &Address, amount: i128) -> Result<(), Error> {
    let registry = env.current_contract_address();
    let token_client = token::Client::new(env, token);

    // transfer_from enforces both allowance and balance
    match token_client.try_transfer_from(&registry, from, &registry, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::FundingTransferFailed),
    }
}

/// Send escrowed tokens out of this contract
fn push_funds(env: &Env, token: &Address, to: &Address, amount: i128) -> Result<(), Error> {
    let token_client = token::Client::new(env, token);
    match token_client.try_transfer(&env.current_contract_address(), to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::FundingTransferFailed),
    }
}

fn hash_preimage(env: &Env, algorithm: HashAlgorithm, preimage: &BytesN<32>) -> BytesN<32> {
    let data = Bytes::from(preimage.clone());
    match algorithm {
        HashAlgorithm::Sha256 => env.crypto().sha256(&data).to_bytes(),
        HashAlgorithm::Keccak256 => env.crypto().keccak256(&data).to_bytes(),
    }
}

/// Contract id: sha256 over the binding terms in fixed order and width
///
/// Layout (155 bytes):
/// sender (33) + receiver (33) + token (33) + amount (16, big-endian)
/// + hashlock (32) + timelock (8, big-endian)
fn derive_contract_id(env: &Env, terms: &ContractTerms) -> BytesN<32> {
    let mut data = Bytes::new(env);

    data.append(&encode_address(env, &terms.sender));
    data.append(&encode_address(env, &terms.receiver));
    data.append(&encode_address(env, &terms.token));
    data.extend_from_array(&terms.amount.to_be_bytes());
    data.append(&Bytes::from(terms.hashlock.clone()));
    data.extend_from_array(&terms.timelock.to_be_bytes());

    env.crypto().sha256(&data).to_bytes()
}

/// Encode an address as 33 bytes: a kind byte (0 = account, 1 = contract)
/// followed by the raw 32-byte key.
///
/// XDR of an address value:
/// - Account: 4 bytes (ScVal tag) + 4 bytes (ScAddress tag=0) + 4 bytes (PublicKeyType::Ed25519) + 32 bytes (key) = 44 bytes
/// - Contract: 4 bytes (ScVal tag) + 4 bytes (ScAddress tag=1) + 32 bytes (contract ID) = 40 bytes
fn encode_address(env: &Env, addr: &Address) -> Bytes {
    let xdr = addr.clone().to_xdr(env);
    let kind = xdr.get(7).unwrap_or(0);
    let key_start: u32 = if kind == 0 { 12 } else { 8 };

    let mut encoded = Bytes::new(env);
    encoded.push_back(kind);
    encoded.append(&xdr.slice(key_start..key_start + 32));
    encoded
}
