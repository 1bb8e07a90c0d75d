use crate::errors::Error;
use crate::types::{HashAlgorithm, StoredContract};
use soroban_sdk::{symbol_short, BytesN, Env};

// Ledgers close roughly every 5 seconds
const DAY_IN_LEDGERS: u32 = 17_280;
const TTL_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;
const TTL_EXTEND_TO: u32 = 30 * DAY_IN_LEDGERS;

// Storage keys using symbol_short!
fn hash_alg_key() -> soroban_sdk::Symbol {
    symbol_short!("HASH_ALG")
}

// Key builders
fn contract_key(contract_id: &BytesN<32>) -> (soroban_sdk::Symbol, BytesN<32>) {
    (symbol_short!("HTLC"), contract_id.clone())
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

// Hash Algorithm
pub fn has_hash_algorithm(env: &Env) -> bool {
    env.storage().instance().has(&hash_alg_key())
}

pub fn get_hash_algorithm(env: &Env) -> Result<HashAlgorithm, Error> {
    env.storage()
        .instance()
        .get(&hash_alg_key())
        .ok_or(Error::NotInitialized)
}

pub fn set_hash_algorithm(env: &Env, algorithm: HashAlgorithm) {
    env.storage().instance().set(&hash_alg_key(), &algorithm);
}

// Contracts
pub fn has_contract(env: &Env, contract_id: &BytesN<32>) -> bool {
    env.storage().persistent().has(&contract_key(contract_id))
}

pub fn get_contract(env: &Env, contract_id: &BytesN<32>) -> Result<StoredContract, Error> {
    let key = contract_key(contract_id);
    let record: StoredContract = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::NotFound)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(record)
}

pub fn set_contract(env: &Env, contract_id: &BytesN<32>, record: &StoredContract) {
    let key = contract_key(contract_id);
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
