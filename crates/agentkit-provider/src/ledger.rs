// SPDX-FileCopyrightText: 2026 AgentKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Balance-ledger action provider.
//!
//! Simulates an on-chain account model: each address holds a per-token
//! balance. Every mutating action runs its balance check and both legs of
//! the update under one lock, so concurrent callers never observe a
//! half-applied transfer and no balance ever goes below zero.
//!
//! Actions: `init`, `transfer`, `swap`, `send_transaction`,
//! `get_chain_info`, `balance_of`.

use std::collections::BTreeMap;
use std::sync::Arc;

use agentkit_core::{ActionProvider, KitError, Params};
use agentkit_signer::ConnectionDescriptor;
use async_trait::async_trait;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;
use tracing::debug;

use crate::args;

/// Token used by `transfer` when none is given.
pub const DEFAULT_TOKEN: &str = "ETH";

const ACTIONS: [&str; 6] = [
    "balance_of",
    "get_chain_info",
    "init",
    "send_transaction",
    "swap",
    "transfer",
];

/// Per-token balances of one address.
pub type Balances = BTreeMap<String, f64>;

/// The full ledger: address -> token -> balance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    accounts: BTreeMap<String, Balances>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balances of `address`, empty if the address is unknown.
    pub fn balances(&self, address: &str) -> Balances {
        self.accounts.get(address).cloned().unwrap_or_default()
    }

    /// Balance of one token, zero if absent.
    pub fn balance(&self, address: &str, token: &str) -> f64 {
        self.accounts
            .get(address)
            .and_then(|b| b.get(token))
            .copied()
            .unwrap_or(0.0)
    }

    /// Sum of `token` across every address.
    pub fn total(&self, token: &str) -> f64 {
        self.accounts
            .values()
            .filter_map(|b| b.get(token))
            .sum()
    }

    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.accounts.keys().map(String::as_str)
    }

    /// Adds each amount to the address's balances, creating entries as needed.
    ///
    /// Fails without changing anything if any resulting balance would not be
    /// finite.
    pub fn init(&mut self, address: &str, deposits: &Balances) -> Result<Balances, KitError> {
        let mut credited = Vec::with_capacity(deposits.len());
        for (token, amount) in deposits {
            let next = credit(self.balance(address, token), *amount, address, token)?;
            credited.push((token.clone(), next));
        }

        let account = self.accounts.entry(address.to_string()).or_default();
        account.extend(credited);
        Ok(account.clone())
    }

    /// Moves `amount` of `token` from one address to another.
    ///
    /// Both addresses get a zero entry for `token` before the check. On
    /// failure no balance changes.
    pub fn transfer(
        &mut self,
        from: &str,
        to: &str,
        token: &str,
        amount: f64,
    ) -> Result<(), KitError> {
        self.touch(from, token);
        self.touch(to, token);

        let available = self.balance(from, token);
        if available < amount {
            return Err(KitError::InsufficientBalance {
                address: from.to_string(),
                token: token.to_string(),
                available,
                requested: amount,
            });
        }

        let debited = available - amount;
        let current = if from == to { debited } else { self.balance(to, token) };
        let credited = credit(current, amount, to, token)?;

        self.set(from, token, debited);
        self.set(to, token, credited);
        Ok(())
    }

    /// Exchanges `amount` of `from_token` for the same amount of `to_token`.
    pub fn swap(
        &mut self,
        address: &str,
        from_token: &str,
        to_token: &str,
        amount: f64,
    ) -> Result<(), KitError> {
        self.touch(address, from_token);
        self.touch(address, to_token);

        let available = self.balance(address, from_token);
        if available < amount {
            return Err(KitError::InsufficientBalance {
                address: address.to_string(),
                token: from_token.to_string(),
                available,
                requested: amount,
            });
        }

        // Naive 1:1 rate; there is no price source.
        let debited = available - amount;
        let current = if from_token == to_token {
            debited
        } else {
            self.balance(address, to_token)
        };
        let credited = credit(current, amount, address, to_token)?;

        self.set(address, from_token, debited);
        self.set(address, to_token, credited);
        Ok(())
    }

    fn touch(&mut self, address: &str, token: &str) {
        self.accounts
            .entry(address.to_string())
            .or_default()
            .entry(token.to_string())
            .or_insert(0.0);
    }

    fn set(&mut self, address: &str, token: &str, value: f64) {
        if let Some(balance) = self
            .accounts
            .get_mut(address)
            .and_then(|b| b.get_mut(token))
        {
            *balance = value;
        }
    }
}

/// `current + amount`, rejected when the sum overflows to infinity.
fn credit(current: f64, amount: f64, address: &str, token: &str) -> Result<f64, KitError> {
    let next = current + amount;
    if next.is_finite() {
        Ok(next)
    } else {
        Err(KitError::InvalidArgument(format!(
            "crediting {amount} {token} to `{address}` would overflow its balance"
        )))
    }
}

/// Action provider backed by an in-memory [`Ledger`].
pub struct LedgerProvider {
    name: String,
    connection: Arc<ConnectionDescriptor>,
    ledger: Mutex<Ledger>,
}

impl LedgerProvider {
    /// Creates an empty ledger provider signing with `connection`.
    pub fn new(name: impl Into<String>, connection: Arc<ConnectionDescriptor>) -> Self {
        Self {
            name: name.into(),
            connection,
            ledger: Mutex::new(Ledger::new()),
        }
    }

    /// Copy of the whole ledger.
    pub async fn snapshot(&self) -> Ledger {
        self.ledger.lock().await.clone()
    }

    /// Balances of one address.
    pub async fn balances(&self, address: &str) -> Balances {
        self.ledger.lock().await.balances(address)
    }

    async fn init(&self, params: &Params) -> Result<Value, KitError> {
        let address = args::required_str(params, "address", "init")?;
        let mut deposits = Balances::new();
        match params.get("balances") {
            None | Some(Value::Null) => {}
            Some(Value::Object(map)) => {
                for (token, value) in map {
                    let amount = args::parse_amount(value).ok_or_else(|| {
                        KitError::InvalidArgument(format!(
                            "init: balance for `{token}` must be a non-negative number, got {value}"
                        ))
                    })?;
                    deposits.insert(token.clone(), amount);
                }
            }
            Some(other) => {
                return Err(KitError::InvalidArgument(format!(
                    "init: `balances` must be an object, got {other}"
                )));
            }
        }

        let balances = self.ledger.lock().await.init(&address, &deposits)?;
        Ok(json!({"status": "ok", "address": address, "balances": balances}))
    }

    async fn transfer(&self, params: &Params) -> Result<Value, KitError> {
        let from = args::required_str(params, "from", "transfer")?;
        let to = args::required_str(params, "to", "transfer")?;
        let amount = args::amount(params, "amount", "transfer")?;
        let token = args::str_or(params, "token", DEFAULT_TOKEN);

        self.ledger
            .lock()
            .await
            .transfer(&from, &to, &token, amount)?;

        Ok(json!({
            "status": "ok",
            "from": from,
            "to": to,
            "token": token,
            "amount": amount,
        }))
    }

    async fn swap(&self, params: &Params) -> Result<Value, KitError> {
        let address = args::required_str(params, "address", "swap")?;
        let from_token = args::required_str(params, "from_token", "swap")?;
        let to_token = args::required_str(params, "to_token", "swap")?;
        let amount = args::amount(params, "amount", "swap")?;

        self.ledger
            .lock()
            .await
            .swap(&address, &from_token, &to_token, amount)?;

        Ok(json!({
            "status": "ok",
            "address": address,
            "from_token": from_token,
            "to_token": to_token,
            "amount": amount,
        }))
    }

    fn send_transaction(&self, params: &Params) -> Result<Value, KitError> {
        let tx = params.get("tx").cloned().unwrap_or_else(|| json!({}));
        let raw = serde_json::to_vec(&tx)
            .map_err(|e| KitError::Internal(format!("failed to serialize transaction: {e}")))?;

        let signature = self.connection.sign(&raw);

        let mut hasher = Sha256::new();
        hasher.update(&raw);
        hasher.update(signature.hex.as_bytes());
        let tx_hash = format!("0x{}", hex::encode(hasher.finalize()));

        Ok(json!({
            "status": "ok",
            "tx_hash": tx_hash,
            "signature": signature.hex,
            "simulated_signature": signature.simulated,
        }))
    }

    fn get_chain_info(&self) -> Value {
        json!({
            "endpoint": self.connection.endpoint(),
            "key_name": self.connection.key_name(),
        })
    }

    async fn balance_of(&self, params: &Params) -> Result<Value, KitError> {
        let address = args::required_str(params, "address", "balance_of")?;
        let balances = self.balances(&address).await;
        Ok(json!({"address": address, "balances": balances}))
    }
}

#[async_trait]
impl ActionProvider for LedgerProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn actions(&self) -> Vec<String> {
        ACTIONS.iter().map(|a| a.to_string()).collect()
    }

    async fn perform(&self, action: &str, params: Params) -> Result<Value, KitError> {
        debug!(provider = %self.name, action, "ledger perform");
        match action {
            "init" => self.init(&params).await,
            "transfer" => self.transfer(&params).await,
            "swap" => self.swap(&params).await,
            "send_transaction" => self.send_transaction(&params),
            "get_chain_info" => Ok(self.get_chain_info()),
            "balance_of" => self.balance_of(&params).await,
            _ => Err(KitError::UnknownAction {
                provider: self.name.clone(),
                action: action.to_string(),
            }),
        }
    }
}
