use chrono::Utc;
use std::sync::Arc;

use crate::error::{BotError, Result};
use crate::services::check_in::{
    check_in_status, submit_check_in, CheckInOutcome, CheckInStatus, RetryPolicy,
};
use crate::services::notifier::{build_notification, notify_transaction, NotifyOutcome};
use crate::services::rotation::RotationState;
use crate::services::settings::CycleSettings;
use crate::services::wrap::{execute_wrap, WrapOutcome};
use crate::utils::{ChainClient, HttpClient, Logger, Pacer, Wallet};

/// What one wallet cycle did. The loop logs it and moves on.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub wallet_index: usize,
    pub status: CheckInStatus,
    pub check_in: Option<CheckInOutcome>,
    pub wrap: WrapOutcome,
    pub notification: Option<NotifyOutcome>,
    /// Wraps submitted by this wallet so far, this one included.
    pub tx_count: u64,
}

pub struct CheckInBot {
    wallets: Vec<Wallet>,
    http: Arc<dyn HttpClient>,
    chain: Arc<dyn ChainClient>,
    pacer: Arc<dyn Pacer>,
    settings: CycleSettings,
}

impl CheckInBot {
    pub fn new(
        wallets: Vec<Wallet>,
        http: Arc<dyn HttpClient>,
        chain: Arc<dyn ChainClient>,
        pacer: Arc<dyn Pacer>,
        settings: CycleSettings,
    ) -> Result<Self> {
        if wallets.is_empty() {
            return Err(BotError::Config("at least one wallet is required".into()));
        }
        Ok(Self {
            wallets,
            http,
            chain,
            pacer,
            settings,
        })
    }

    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    pub fn settings(&self) -> &CycleSettings {
        &self.settings
    }

    /// Status check, check-in when due, gated wrap, notification.
    pub async fn run_cycle(&self, wallet: &Wallet, state: &mut RotationState) -> CycleReport {
        let address = wallet.address_string();
        Logger::account_banner(wallet.index, &address, state.tx_count(wallet.index));

        let status = check_in_status(
            self.http.as_ref(),
            &self.settings.endpoints.check_in_status_url,
            &address,
            Utc::now(),
        )
        .await;

        let check_in = match status {
            CheckInStatus::CheckedInToday => None,
            CheckInStatus::Due => Some(
                submit_check_in(
                    self.http.as_ref(),
                    self.pacer.as_ref(),
                    &self.settings.endpoints.check_in_url,
                    &address,
                    RetryPolicy {
                        retries: self.settings.check_in_retries,
                        delay: self.settings.retry_delay,
                    },
                )
                .await,
            ),
        };

        let wrap = execute_wrap(
            self.chain.as_ref(),
            self.http.as_ref(),
            self.pacer.as_ref(),
            &self.settings,
            wallet,
        )
        .await;

        let notification = match &wrap {
            WrapOutcome::Submitted { tx_hash, gas_price } => {
                let total = state.record_wrap(wallet.index);
                Logger::info(&format!("Account {} total tx: {}", wallet.index + 1, total));
                let notification = build_notification(
                    self.settings.chain_id,
                    wallet.address,
                    *tx_hash,
                    self.settings.wrapped_token,
                    self.settings.wrap_contract,
                    *gas_price,
                );
                Some(
                    notify_transaction(
                        self.http.as_ref(),
                        &self.settings.endpoints.transaction_url,
                        &notification,
                    )
                    .await,
                )
            }
            _ => None,
        };

        CycleReport {
            wallet_index: wallet.index,
            status,
            check_in,
            wrap,
            notification,
            tx_count: state.tx_count(wallet.index),
        }
    }

    /// Next wallet by round-robin, one cycle, then the pacing countdown.
    pub async fn run_iteration(&self, state: &mut RotationState) -> CycleReport {
        let index = state.next_wallet_index(self.wallets.len());
        let report = self.run_cycle(&self.wallets[index], state).await;
        tracing::debug!(?report, "cycle finished");
        self.pacer
            .countdown("Next Swap in", self.settings.loop_delay_secs)
            .await;
        report
    }

    /// Never returns; the process is stopped from outside.
    pub async fn run_forever(&self, state: &mut RotationState) {
        loop {
            self.run_iteration(state).await;
            Logger::separator();
        }
    }
}
