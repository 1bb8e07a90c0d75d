use crate::types::HashAlgorithm;
use soroban_sdk::{Address, BytesN, Env, Symbol};

pub fn emit_initialized(env: &Env, hash_algorithm: HashAlgorithm) {
    env.events()
        .publish((Symbol::new(env, "initialized"),), hash_algorithm);
}

pub fn emit_htlc_new(
    env: &Env,
    contract_id: BytesN<32>,
    sender: Address,
    receiver: Address,
    token: Address,
    amount: i128,
    hashlock: BytesN<32>,
    timelock: u64,
) {
    env.events().publish(
        (Symbol::new(env, "htlc_new"), contract_id),
        (sender, receiver, token, amount, hashlock, timelock),
    );
}

/// The preimage is published so the counterparty of a swap can read the
/// secret off the event stream and claim the mirrored lock.
pub fn emit_htlc_withdraw(env: &Env, contract_id: BytesN<32>, receiver: Address, preimage: BytesN<32>) {
    env.events().publish(
        (Symbol::new(env, "htlc_withdraw"), contract_id),
        (receiver, preimage),
    );
}

pub fn emit_htlc_refund(env: &Env, contract_id: BytesN<32>, sender: Address, amount: i128) {
    env.events().publish(
        (Symbol::new(env, "htlc_refund"), contract_id),
        (sender, amount),
    );
}
