//! Document orchestration: dispatch by document type, drive the per-line
//! engines and assemble the structured outcome.
//!
//! The allocator itself is a thin bundle of collaborator seams. All writes go
//! through the [`LotStore`]; callers wrap `process` in a transaction and roll
//! back when it returns an error or an invalid outcome.

use std::collections::HashMap;
use std::mem;

use tracing::{debug, warn};

use stockyard_core::{LocationId, Rounding};
use stockyard_warehouse::{AllocationPolicy, Document, DocumentType, Location, Position};

use crate::consume::{self, ConsumeOutcome, LotMutation};
use crate::error::AllocationError;
use crate::outcome::{DocumentOutcome, LineResult};
use crate::shortfall::ShortfallReport;
use crate::store::{
    LotStore, PalletDisposalService, ReservationService, StorageLocationResolver, UnitDictionary,
};

/// The resource allocation engine over a set of collaborator seams.
pub struct Allocator<'a> {
    pub(crate) store: &'a dyn LotStore,
    pub(crate) reservations: &'a dyn ReservationService,
    pub(crate) pallets: &'a dyn PalletDisposalService,
    pub(crate) units: &'a dyn UnitDictionary,
    pub(crate) storage_locations: &'a dyn StorageLocationResolver,
    pub(crate) rounding: Rounding,
}

impl<'a> Allocator<'a> {
    pub fn new(
        store: &'a dyn LotStore,
        reservations: &'a dyn ReservationService,
        pallets: &'a dyn PalletDisposalService,
        units: &'a dyn UnitDictionary,
        storage_locations: &'a dyn StorageLocationResolver,
    ) -> Self {
        Self {
            store,
            reservations,
            pallets,
            units,
            storage_locations,
            rounding: Rounding::default(),
        }
    }

    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Process a whole document and report per-line results.
    ///
    /// `Err` means a fatal failure (rejected lot save, missing location); the
    /// document-level invalidity of shortfalls and rejected transfer lines is
    /// reported through the outcome instead.
    pub fn process(&self, document: Document) -> Result<DocumentOutcome, AllocationError> {
        match document.document_type {
            DocumentType::Receipt | DocumentType::InternalInbound => self.process_inbound(document),
            DocumentType::InternalOutbound | DocumentType::Release => {
                self.process_outbound(document)
            }
            DocumentType::Transfer => self.process_transfer(document),
        }
    }

    fn process_inbound(&self, mut document: Document) -> Result<DocumentOutcome, AllocationError> {
        let destination = document
            .location_to
            .clone()
            .ok_or(AllocationError::MissingLocation { role: "destination" })?;

        let mut positions = mem::take(&mut document.positions);
        let mut lines = Vec::with_capacity(positions.len());

        for position in &mut positions {
            let lot = self.receive(&document, destination.id, position)?;
            debug!(lot = %lot.id, product = %position.product.number, quantity = %lot.quantity, "lot received");
            lines.push(LineResult::Fulfilled { positions: vec![position.clone()] });
        }

        document.positions = positions;
        Ok(DocumentOutcome { document, lines, shortfall: None })
    }

    fn process_outbound(&self, mut document: Document) -> Result<DocumentOutcome, AllocationError> {
        let origin = document
            .location_from
            .clone()
            .ok_or(AllocationError::MissingLocation { role: "source" })?;

        let positions = mem::take(&mut document.positions);
        let mut lines = Vec::with_capacity(positions.len());
        let mut rewritten = Vec::with_capacity(positions.len());
        let mut report = ShortfallReport::new(&origin);
        let mut per_product = HashMap::new();

        for mut position in positions {
            let (location, policy) = self.line_source(&origin, &position);
            let candidates = self.select_candidates(location, &position, policy);

            match consume::plan(
                candidates,
                &position,
                self.reservations.enabled(),
                self.units,
                self.rounding,
            ) {
                ConsumeOutcome::Satisfied(plan) => {
                    self.apply_mutations(plan.mutations)?;
                    self.reservations.release(&position);

                    let results = plan.positions;
                    if results.len() == 1 {
                        position.copy_allocation_fields(&results[0]);
                        lines.push(LineResult::Fulfilled { positions: vec![position.clone()] });
                        rewritten.push(position);
                    } else {
                        lines.push(LineResult::Fulfilled { positions: results.clone() });
                        rewritten.extend(results);
                    }
                }
                ConsumeOutcome::Shortfall => {
                    warn!(
                        product = %position.product.number,
                        requested = %position.quantity,
                        "not enough stock to allocate"
                    );
                    let manual = policy == AllocationPolicy::Manual;
                    let in_warehouse =
                        self.quantity_in_warehouse(location, &position, manual, &mut per_product);
                    report.add_entry(&position.product, position.quantity - in_warehouse);
                    lines.push(LineResult::Shortfall { requested: position.quantity });
                    rewritten.push(position);
                }
            }
        }

        document.positions = rewritten;
        let shortfall = (!report.is_empty()).then_some(report);
        Ok(DocumentOutcome { document, lines, shortfall })
    }

    fn process_transfer(&self, mut document: Document) -> Result<DocumentOutcome, AllocationError> {
        let origin = document
            .location_from
            .clone()
            .ok_or(AllocationError::MissingLocation { role: "source" })?;
        let destination = document
            .location_to
            .clone()
            .ok_or(AllocationError::MissingLocation { role: "destination" })?;

        let positions = mem::take(&mut document.positions);
        let mut lines = Vec::with_capacity(positions.len());
        let mut rewritten = Vec::with_capacity(positions.len());
        let mut report = ShortfallReport::new(&origin);
        let mut per_product = HashMap::new();

        for mut position in positions {
            let (location, policy) = self.line_source(&origin, &position);
            let result = self.move_line(&document, &origin, &destination, &position, policy)?;

            match result {
                LineResult::Fulfilled { positions: results } => {
                    self.reservations.release(&position);
                    if results.len() == 1 {
                        position.copy_allocation_fields(&results[0]);
                        lines.push(LineResult::Fulfilled { positions: vec![position.clone()] });
                        rewritten.push(position);
                    } else {
                        lines.push(LineResult::Fulfilled { positions: results.clone() });
                        rewritten.extend(results);
                    }
                }
                result @ (LineResult::Shortfall { .. } | LineResult::Rejected { .. }) => {
                    warn!(
                        product = %position.product.number,
                        requested = %position.quantity,
                        "transfer line failed"
                    );
                    let manual = policy == AllocationPolicy::Manual;
                    let in_warehouse =
                        self.quantity_in_warehouse(location, &position, manual, &mut per_product);
                    report.add_entry(&position.product, position.quantity - in_warehouse);
                    lines.push(result);
                    rewritten.push(position);
                }
            }
        }

        document.positions = rewritten;
        let shortfall = (!report.is_empty()).then_some(report);
        Ok(DocumentOutcome { document, lines, shortfall })
    }

    /// Where a line draws from: an explicit, still-existing lot pick pins the
    /// lot's own location under manual selection; everything else follows the
    /// document's source warehouse and its policy.
    fn line_source(&self, origin: &Location, position: &Position) -> (LocationId, AllocationPolicy) {
        if let Some(lot) = position.lot.and_then(|id| self.store.get(id)) {
            return (lot.location, AllocationPolicy::Manual);
        }
        (origin.id, origin.policy)
    }

    fn apply_mutations(&self, mutations: Vec<LotMutation>) -> Result<(), AllocationError> {
        for mutation in mutations {
            match mutation {
                LotMutation::Save(lot) => {
                    self.store
                        .save(lot)
                        .map_err(|errors| AllocationError::InvalidLot { errors })?;
                }
                LotMutation::Delete { id, pallet } => {
                    self.store.delete(id);
                    if let Some(pallet) = &pallet {
                        self.pallets.try_dispose(pallet);
                    }
                }
            }
        }
        Ok(())
    }
}
