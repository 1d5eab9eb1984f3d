// Copyright (c) 2022-2023 The MobileCoin Foundation

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use sha2::{Digest, Sha256};

use super::{hex_string, ReviewPlan};
use crate::tx::{AccessKey, Action, FunctionCall, Permission, TxField, TxVisitor};

/// Streaming transaction renderer, appends review fields to a [`ReviewPlan`]
/// as each [`TxField`] is decoded.
///
/// Amounts are rendered as exact yoctoNEAR integers.
pub struct TxRenderer<'p> {
    plan: &'p mut ReviewPlan,
}

impl<'p> TxRenderer<'p> {
    pub fn new(plan: &'p mut ReviewPlan) -> Self {
        Self { plan }
    }

    fn action(&mut self, index: u32, count: u32, action: &Action) {
        let kind = action.kind().to_string();
        match count {
            1 => self.plan.push("Action", kind),
            _ => self
                .plan
                .push_fmt(format_args!("Action {}/{}", index + 1, count), kind),
        }

        match action {
            Action::CreateAccount => (),
            Action::DeployContract { code } => {
                let hash = Sha256::digest(code);

                self.plan.push("Code size", format!("{} bytes", code.len()));
                self.plan
                    .push("Code hash", bs58::encode(&hash[..]).into_string());
            }
            Action::FunctionCall(FunctionCall {
                method_name,
                args,
                gas,
                deposit,
            }) => {
                self.plan.push("Method", method_name.to_string());
                self.plan.push("Args", render_args(args));
                self.plan.push("Gas", gas.to_string());
                self.plan.push("Deposit (yoctoNEAR)", deposit.to_string());
            }
            Action::Transfer { deposit } => {
                self.plan.push("Amount (yoctoNEAR)", deposit.to_string());
            }
            Action::Stake { stake, public_key } => {
                self.plan.push("Stake (yoctoNEAR)", stake.to_string());
                self.plan.push("Validator key", public_key.to_string());
            }
            Action::AddKey {
                public_key,
                access_key,
            } => {
                self.plan.push("Public key", public_key.to_string());
                self.access_key(access_key);
            }
            Action::DeleteKey { public_key } => {
                self.plan.push("Public key", public_key.to_string());
            }
            Action::DeleteAccount { beneficiary_id } => {
                self.plan.push("Beneficiary", beneficiary_id.to_string());
            }
        }
    }

    fn access_key(&mut self, access_key: &AccessKey) {
        self.plan.push("Key nonce", access_key.nonce.to_string());

        match &access_key.permission {
            Permission::FullAccess => {
                self.plan.push("Permission", "Full access".to_string());
                self.plan.push(
                    "Danger",
                    "This gives full access to a device other than Ledger".to_string(),
                );
            }
            Permission::FunctionCall {
                allowance,
                receiver_id,
                method_names,
            } => {
                self.plan.push("Permission", "Function call".to_string());

                // Absent allowance is unlimited, distinct from zero
                let allowance = match allowance {
                    Some(a) => a.to_string(),
                    None => "Unlimited".to_string(),
                };
                self.plan.push("Allowance (yoctoNEAR)", allowance);

                self.plan.push("Contract", receiver_id.to_string());

                let methods = match method_names.is_empty() {
                    true => "Any".to_string(),
                    false => method_names.iter().collect::<Vec<_>>().join(", "),
                };
                self.plan.push("Methods", methods);
            }
        }
    }
}

impl<'a, 'p> TxVisitor<'a> for TxRenderer<'p> {
    fn visit(&mut self, field: TxField<'a>) {
        match field {
            TxField::SignerId(id) => self.plan.push("From", id.to_string()),
            TxField::ReceiverId(id) => self.plan.push("To", id.to_string()),
            TxField::ActionCount(n) if n != 1 => self.plan.push("Actions", n.to_string()),
            TxField::Action {
                index,
                count,
                action,
            } => self.action(index, count, &action),
            // Signer key, nonce and block hash do not affect the outcome the user approves
            _ => (),
        }
    }
}

/// Render function call arguments, JSON objects as text and anything else as hex
fn render_args(args: &[u8]) -> String {
    match core::str::from_utf8(args) {
        Ok(s) if s.starts_with('{') => s.to_string(),
        _ => hex_string(args),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tx::{decode_transaction, TxBuilder};

    fn render(b: &[u8]) -> ReviewPlan {
        let mut p = ReviewPlan::new();
        decode_transaction(b, &mut TxRenderer::new(&mut p)).unwrap();
        p
    }

    const TRANSFER: &str = "12000000626c61626c61746573742e746573746e657400c4f5941e81e071c2fd1dae2e71fd3d859d462484391d9a90bf219211dcbb320f0f7ac5e5c85700001000000073706563756c6f732e746573746e6574a3f5d1167a5c605fed71fc78d4381bef47a5acb3aba6fc9c07d7b8b912fc1e2a010000000300002083c7f60387211a000000000000";

    #[test]
    fn render_reference_transfer() {
        let b = hex::decode(TRANSFER).unwrap();
        let p = render(&b);

        let fields: Vec<_> = p
            .fields()
            .iter()
            .map(|f| (f.label.as_str(), f.value.as_str()))
            .collect();

        assert_eq!(
            fields,
            [
                ("From", "blablatest.testnet"),
                ("To", "speculos.testnet"),
                ("Action", "Transfer"),
                ("Amount (yoctoNEAR)", "123400000000000000000000"),
            ]
        );
    }

    #[test]
    fn render_large_amounts_exactly() {
        let mut b = TxBuilder::new("alice.near", "bob.near", 1);
        b.u8(3).u128(u128::MAX);

        let p = render(&b.0);
        assert_eq!(
            p.find("Amount (yoctoNEAR)"),
            Some("340282366920938463463374607431768211455")
        );
    }

    #[test]
    fn render_multiple_actions_in_order() {
        let mut b = TxBuilder::new("alice.near", "bob.near", 2);
        b.u8(3).u128(1);
        b.u8(7).string("carol.near");

        let p = render(&b.0);
        let labels: Vec<_> = p.fields().iter().map(|f| f.label.as_str()).collect();

        assert_eq!(
            labels,
            [
                "From",
                "To",
                "Actions",
                "Action 1/2",
                "Amount (yoctoNEAR)",
                "Action 2/2",
                "Beneficiary",
            ]
        );
        assert_eq!(p.find("Action 2/2"), Some("Delete Account"));
    }

    #[test]
    fn render_function_call_args() {
        let mut b = TxBuilder::new("alice.near", "wrap.near", 1);
        b.u8(2)
            .string("ft_transfer")
            .bytes(br#"{"amount":"1"}"#)
            .u64(30_000_000_000_000)
            .u128(1);

        let p = render(&b.0);
        assert_eq!(p.find("Method"), Some("ft_transfer"));
        assert_eq!(p.find("Args"), Some(r#"{"amount":"1"}"#));
        assert_eq!(p.find("Gas"), Some("30000000000000"));
        assert_eq!(p.find("Deposit (yoctoNEAR)"), Some("1"));

        let mut b = TxBuilder::new("alice.near", "wrap.near", 1);
        b.u8(2).string("raw").bytes(&[0xaa, 0xbb]).u64(1).u128(0);

        let p = render(&b.0);
        assert_eq!(p.find("Args"), Some("AABB"));
    }

    #[test]
    fn render_allowance() {
        for (allowance, expected) in [(None, "Unlimited"), (Some(0u128), "0")] {
            let mut b = TxBuilder::new("alice.near", "bob.near", 1);
            b.u8(5).key(0, [0x44; 32]).u64(0).u8(0);
            match allowance {
                Some(a) => b.u8(1).u128(a),
                None => b.u8(0),
            };
            b.string("app.near").0.extend_from_slice(&0u32.to_le_bytes());

            let p = render(&b.0);
            assert_eq!(p.find("Permission"), Some("Function call"));
            assert_eq!(p.find("Allowance (yoctoNEAR)"), Some(expected));
            assert_eq!(p.find("Contract"), Some("app.near"));
            assert_eq!(p.find("Methods"), Some("Any"));
            assert_eq!(p.find("Danger"), None);
        }
    }

    #[test]
    fn render_full_access_key() {
        let mut b = TxBuilder::new("alice.near", "alice.near", 1);
        b.u8(5).key(0, [0u8; 32]).u64(3).u8(1);

        let p = render(&b.0);
        assert_eq!(
            p.find("Public key"),
            Some("ed25519:11111111111111111111111111111111")
        );
        assert_eq!(p.find("Key nonce"), Some("3"));
        assert_eq!(p.find("Permission"), Some("Full access"));
        assert_eq!(
            p.find("Danger"),
            Some("This gives full access to a device other than Ledger")
        );
        assert_eq!(p.find("Allowance (yoctoNEAR)"), None);

        // Warning directly follows the permission
        let labels: Vec<_> = p.fields().iter().map(|f| f.label.as_str()).collect();
        assert_eq!(&labels[labels.len() - 2..], &["Permission", "Danger"]);
    }

    #[test]
    fn render_deploy_contract() {
        let mut b = TxBuilder::new("alice.near", "alice.near", 1);
        b.u8(1).bytes(&[0u8; 100]);

        let p = render(&b.0);
        assert_eq!(p.find("Action"), Some("Deploy Contract"));
        assert_eq!(p.find("Code size"), Some("100 bytes"));
        assert!(p.find("Code hash").is_some());
    }
}
