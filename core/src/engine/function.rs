// Copyright (c) 2022-2023 The MobileCoin Foundation

use zeroize::Zeroize;

use ledger_near_apdu::path::DerivationPath;

use super::ApprovalState;
use crate::review::ReviewPlan;

/// Payload awaiting approval for a signing operation
#[derive(Clone, PartialEq, Debug)]
pub enum Payload {
    /// Transaction held in the reassembly buffer
    Transaction,
    /// Blind signing hash
    Hash([u8; 32]),
}

/// Operation context for the command currently under review
pub struct Function {
    inner: FunctionType,
}

impl Default for Function {
    fn default() -> Self {
        Self::new()
    }
}

enum FunctionType {
    None,

    /// Public key / wallet id display
    PublicKey {
        public_key: [u8; 32],
        plan: ReviewPlan,
        approval: ApprovalState,
    },

    /// Transaction or blind signing
    Sign {
        path: DerivationPath,
        payload: Payload,
        plan: ReviewPlan,
        approval: ApprovalState,
    },
}

impl Function {
    /// Create a new / empty function context
    pub const fn new() -> Self {
        Self {
            inner: FunctionType::None,
        }
    }

    /// Setup public key review
    pub fn public_key_init(&mut self, public_key: [u8; 32], plan: ReviewPlan) {
        // Clear function prior to init
        self.clear();

        let approval = ApprovalState::review(plan.len());
        self.inner = FunctionType::PublicKey {
            public_key,
            plan,
            approval,
        };
    }

    /// Setup signing review
    pub fn sign_init(&mut self, path: DerivationPath, payload: Payload, plan: ReviewPlan) {
        self.clear();

        let approval = ApprovalState::review(plan.len());
        self.inner = FunctionType::Sign {
            path,
            payload,
            plan,
            approval,
        };
    }

    /// Fetch the active review plan
    pub fn plan_ref(&self) -> Option<&ReviewPlan> {
        match &self.inner {
            FunctionType::PublicKey { plan, .. } | FunctionType::Sign { plan, .. } => Some(plan),
            FunctionType::None => None,
        }
    }

    /// Fetch the active approval state
    pub fn approval(&self) -> ApprovalState {
        match &self.inner {
            FunctionType::PublicKey { approval, .. } | FunctionType::Sign { approval, .. } => {
                *approval
            }
            FunctionType::None => ApprovalState::Idle,
        }
    }

    /// Fetch the active approval state for update
    pub fn approval_mut(&mut self) -> Option<&mut ApprovalState> {
        match &mut self.inner {
            FunctionType::PublicKey { approval, .. } | FunctionType::Sign { approval, .. } => {
                Some(approval)
            }
            FunctionType::None => None,
        }
    }

    /// Fetch the public key for a pending key review
    pub fn public_key_ref(&self) -> Option<&[u8; 32]> {
        match &self.inner {
            FunctionType::PublicKey { public_key, .. } => Some(public_key),
            _ => None,
        }
    }

    /// Fetch the path and payload for a pending signing review
    pub fn sign_ref(&self) -> Option<(&DerivationPath, &Payload)> {
        match &self.inner {
            FunctionType::Sign { path, payload, .. } => Some((path, payload)),
            _ => None,
        }
    }

    /// Clear context, wiping key, path and hash material
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn clear(&mut self) {
        self.wipe();
        self.inner = FunctionType::None;
    }

    /// Zero held secrets in place
    fn wipe(&mut self) {
        match &mut self.inner {
            FunctionType::PublicKey { public_key, .. } => public_key.zeroize(),
            FunctionType::Sign { path, payload, .. } => {
                path.zeroize();
                if let Payload::Hash(h) = payload {
                    h.zeroize();
                }
            }
            FunctionType::None => (),
        }
    }
}
