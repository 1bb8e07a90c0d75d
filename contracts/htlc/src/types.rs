use soroban_sdk::{contracttype, Address, BytesN, Env};

// Preimage reported for locks that have not been withdrawn
const ZERO_BYTES32: [u8; 32] = [0u8; 32];

/// Digest used to check a preimage against a hashlock
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum HashAlgorithm {
    Sha256,
    Keccak256,
}

/// Settlement state of a lock. `Created` is the only initial state, the
/// other two are terminal.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum ContractState {
    Created,
    Withdrawn(BytesN<32>),
    Refunded,
}

/// Fields fixed at creation. Every one of them feeds the contract id.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ContractTerms {
    pub sender: Address,
    pub receiver: Address,
    pub token: Address,
    pub amount: i128,
    pub hashlock: BytesN<32>,
    pub timelock: u64,
}

/// Persisted form of a lock
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct StoredContract {
    pub terms: ContractTerms,
    pub state: ContractState,
}

/// Public view of a lock, as returned by `get_contract`
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct LockContract {
    pub contract_id: BytesN<32>,
    pub sender: Address,
    pub receiver: Address,
    pub token: Address,
    pub amount: i128,
    pub hashlock: BytesN<32>,
    pub timelock: u64,
    pub withdrawn: bool,
    pub refunded: bool,
    pub preimage: BytesN<32>,
}

impl StoredContract {
    pub fn new(terms: ContractTerms) -> Self {
        StoredContract {
            terms,
            state: ContractState::Created,
        }
    }

    pub fn to_public(&self, env: &Env, contract_id: BytesN<32>) -> LockContract {
        let (withdrawn, refunded, preimage) = match &self.state {
            ContractState::Created => (false, false, BytesN::from_array(env, &ZERO_BYTES32)),
            ContractState::Withdrawn(preimage) => (true, false, preimage.clone()),
            ContractState::Refunded => (false, true, BytesN::from_array(env, &ZERO_BYTES32)),
        };

        LockContract {
            contract_id,
            sender: self.terms.sender.clone(),
            receiver: self.terms.receiver.clone(),
            token: self.terms.token.clone(),
            amount: self.terms.amount,
            hashlock: self.terms.hashlock.clone(),
            timelock: self.terms.timelock,
            withdrawn,
            refunded,
            preimage,
        }
    }
}
