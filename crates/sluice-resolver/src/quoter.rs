//! Quoting against a live execution context with replay protection.

use alloy_primitives::Address;
use tracing::debug;

use sluice_core::error::{OrderError, SluiceError};
use sluice_core::order::{Order, ResolvedOrder};
use sluice_core::traits::{ExecutionContext, FillLedger, SignerRecovery};
use sluice_core::types::{CosignedOverrides, ExecutionSnapshot};

use crate::resolver::Resolver;

/// A [`Resolver`] paired with a [`FillLedger`].
pub struct Quoter<R: SignerRecovery, L: FillLedger> {
    resolver: Resolver<R>,
    ledger: L,
}

impl<R: SignerRecovery, L: FillLedger> Quoter<R, L> {
    pub fn new(resolver: Resolver<R>, ledger: L) -> Self {
        Self { resolver, ledger }
    }

    pub fn resolver(&self) -> &Resolver<R> {
        &self.resolver
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Capture `ctx` once and resolve `order` for `filler`.
    ///
    /// Fails with [`OrderError::AlreadyFilled`] if the ledger has seen the
    /// order hash.
    pub fn quote(
        &self,
        order: &Order,
        overrides: Option<&CosignedOverrides>,
        ctx: &impl ExecutionContext,
        filler: Address,
    ) -> Result<ResolvedOrder, SluiceError> {
        let order_hash = order.order_hash();
        if self.ledger.is_filled(&order_hash) {
            debug!(%order_hash, "order already filled");
            return Err(OrderError::AlreadyFilled(order_hash.to_string()).into());
        }
        let snapshot = ExecutionSnapshot::capture(ctx);
        self.resolver.resolve(order, overrides, &snapshot, filler)
    }
}
