use uplink_core_types::CommandUid;

use crate::codec::{self, WireMap};
use crate::config::Defaults;
use crate::errors::{CmdMetaError, Result};
use crate::model::validity::Validity;
use crate::time::{Clock, GpsTimestamp, SystemClock};

/// Metadata that travels with a command through the uplink pipeline
///
/// Created by the dictionary service when a command parses, then handed from
/// stage to stage. Each stage may replace `payload_bytes`, change the validity
/// state, and append its own name to `processors`. The terminal stage sets
/// `finish_time_gps`.
///
/// `uid` and `start_time_gps` are fixed at construction. `payload_string`,
/// `sequence` and `total` have no mutators.
///
/// `Debug` and `Display` both render the marshalled mapping.
#[derive(Clone, PartialEq)]
pub struct CommandMetadata {
    pub(crate) payload_string: Option<String>,
    pub(crate) payload_bytes: Option<Vec<u8>>,
    pub(crate) apid: Option<u32>,
    pub(crate) validity: Validity,
    pub(crate) sequence: u32,
    pub(crate) total: u32,
    pub(crate) vcid: u8,
    pub(crate) uid: CommandUid,
    pub(crate) uplink_id: Option<u64>,
    pub(crate) processors: Vec<String>,
    pub(crate) start_time_gps: GpsTimestamp,
    pub(crate) finish_time_gps: Option<GpsTimestamp>,
}

impl CommandMetadata {
    /// Create a one-shot command record stamped by the system clock
    pub fn new(payload_string: impl Into<String>, apid: u32) -> Self {
        CommandMetadataBuilder::default()
            .payload_string(payload_string)
            .apid(apid)
            .assemble(&SystemClock)
    }

    /// Start building a record with optional initial values
    pub fn builder() -> CommandMetadataBuilder {
        CommandMetadataBuilder::default()
    }

    // ===== Accessors =====

    pub fn payload_string(&self) -> Option<&str> {
        self.payload_string.as_deref()
    }

    pub fn payload_bytes(&self) -> Option<&[u8]> {
        self.payload_bytes.as_deref()
    }

    pub fn apid(&self) -> Option<u32> {
        self.apid
    }

    pub fn validity(&self) -> &Validity {
        &self.validity
    }

    /// The boolean carried on the wire
    pub fn is_valid(&self) -> bool {
        self.validity.is_valid()
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn vcid(&self) -> u8 {
        self.vcid
    }

    pub fn uid(&self) -> &CommandUid {
        &self.uid
    }

    pub fn uplink_id(&self) -> Option<u64> {
        self.uplink_id
    }

    /// Stage names in the order they processed this record
    pub fn processors(&self) -> &[String] {
        &self.processors
    }

    pub fn start_time_gps(&self) -> GpsTimestamp {
        self.start_time_gps
    }

    pub fn finish_time_gps(&self) -> Option<GpsTimestamp> {
        self.finish_time_gps
    }

    pub fn is_finalized(&self) -> bool {
        self.finish_time_gps.is_some()
    }

    /// Last sub-command of its script (always true for one-shot commands)
    pub fn is_last_in_script(&self) -> bool {
        self.sequence == self.total
    }

    // ===== Stage mutations =====

    /// Replace the current-stage encoding
    pub fn set_payload_bytes(&mut self, bytes: impl Into<Vec<u8>>) {
        self.payload_bytes = Some(bytes.into());
    }

    pub fn set_validity(&mut self, validity: Validity) {
        self.validity = validity;
    }

    pub fn mark_valid(&mut self) {
        self.validity = Validity::Valid;
    }

    pub fn mark_invalid(&mut self, reason: impl Into<String>) {
        self.validity = Validity::invalid(reason);
    }

    /// Append a stage name to the provenance trail
    ///
    /// # Errors
    ///
    /// Returns `CmdMetaError::InvalidInput` for an empty or blank name.
    pub fn append_processor(&mut self, stage: impl Into<String>) -> Result<()> {
        let stage = stage.into();
        if stage.trim().is_empty() {
            return Err(CmdMetaError::InvalidInput {
                field: "processors",
                reason: "stage name cannot be empty".to_string(),
            });
        }
        self.processors.push(stage);
        Ok(())
    }

    /// Record one stage hand-off: append the stage name and store its output
    ///
    /// Nothing changes if the stage name is rejected.
    ///
    /// # Errors
    ///
    /// Returns `CmdMetaError::InvalidInput` for an empty or blank name.
    pub fn record_stage(
        &mut self,
        stage: impl Into<String>,
        payload_bytes: impl Into<Vec<u8>>,
    ) -> Result<()> {
        self.append_processor(stage)?;
        self.set_payload_bytes(payload_bytes);
        Ok(())
    }

    /// Set the opcode on a record constructed without one
    ///
    /// # Errors
    ///
    /// Returns `CmdMetaError::AlreadyAssigned` if an apid is already present.
    pub fn assign_apid(&mut self, apid: u32) -> Result<()> {
        if self.apid.is_some() {
            return Err(CmdMetaError::AlreadyAssigned {
                uid: self.uid.clone(),
                field: "apid",
            });
        }
        self.apid = Some(apid);
        Ok(())
    }

    /// Store the id handed out by the uplink-tracking system
    ///
    /// # Errors
    ///
    /// Returns `CmdMetaError::AlreadyAssigned` if an uplink id is already present.
    pub fn assign_uplink_id(&mut self, uplink_id: u64) -> Result<()> {
        if self.uplink_id.is_some() {
            return Err(CmdMetaError::AlreadyAssigned {
                uid: self.uid.clone(),
                field: "uplink_id",
            });
        }
        self.uplink_id = Some(uplink_id);
        Ok(())
    }

    /// Stamp `finish_time_gps` from the system clock
    ///
    /// # Errors
    ///
    /// See [`CommandMetadata::finalize_with`].
    pub fn finalize(&mut self) -> Result<GpsTimestamp> {
        self.finalize_with(&SystemClock)
    }

    /// Stamp `finish_time_gps` from the given clock
    ///
    /// Finalization happens once. A repeated call is rejected and the stored
    /// finish time is kept; so is a reading earlier than `start_time_gps`.
    ///
    /// # Errors
    ///
    /// - `CmdMetaError::AlreadyFinalized` on a second call
    /// - `CmdMetaError::FinishBeforeStart` if the clock reads before the start time
    pub fn finalize_with(&mut self, clock: &dyn Clock) -> Result<GpsTimestamp> {
        if let Some(finish) = self.finish_time_gps {
            tracing::warn!(uid = %self.uid, finish_time_gps = %finish, "rejected repeated finalize");
            return Err(CmdMetaError::AlreadyFinalized {
                uid: self.uid.clone(),
                finish_time_gps: finish.to_iso_string(),
            });
        }

        let finish = clock.now();
        if finish < self.start_time_gps {
            tracing::warn!(
                uid = %self.uid,
                start_time_gps = %self.start_time_gps,
                finish_time_gps = %finish,
                "rejected finalize before start"
            );
            return Err(CmdMetaError::FinishBeforeStart {
                uid: self.uid.clone(),
                start_time_gps: self.start_time_gps.to_iso_string(),
                finish_time_gps: finish.to_iso_string(),
            });
        }

        self.finish_time_gps = Some(finish);
        tracing::debug!(uid = %self.uid, finish_time_gps = %finish, "record finalized");
        Ok(finish)
    }

    // ===== Wire form =====

    /// Canonical wire mapping
    ///
    /// # Errors
    ///
    /// See [`codec::marshal`].
    pub fn marshal(&self) -> Result<WireMap> {
        codec::marshal(self)
    }

    /// Marshal and encode as msgpack
    ///
    /// # Errors
    ///
    /// Returns marshalling or encoding errors.
    pub fn to_msgpack(&self) -> Result<Vec<u8>> {
        codec::to_msgpack(&self.marshal()?)
    }

    /// Decode msgpack and rebuild the record
    ///
    /// # Errors
    ///
    /// Returns decoding errors and every rejection of [`codec::unmarshal`].
    pub fn from_msgpack(bytes: &[u8]) -> Result<Self> {
        codec::unmarshal(&codec::from_msgpack(bytes)?)
    }

    fn render(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.marshal() {
            Ok(map) => write!(f, "{}", map),
            Err(err) => write!(f, "<unmarshallable CommandMetadata {}: {}>", self.uid, err),
        }
    }
}

impl std::fmt::Display for CommandMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.render(f)
    }
}

impl std::fmt::Debug for CommandMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.render(f)
    }
}

/// Optional initial values for a new [`CommandMetadata`]
#[derive(Debug, Clone)]
pub struct CommandMetadataBuilder {
    payload_string: Option<String>,
    payload_bytes: Option<Vec<u8>>,
    apid: Option<u32>,
    vcid: u8,
    sequence: u32,
    total: u32,
    uplink_id: Option<u64>,
    uid: Option<CommandUid>,
}

impl Default for CommandMetadataBuilder {
    fn default() -> Self {
        Self {
            payload_string: None,
            payload_bytes: None,
            apid: None,
            vcid: 0,
            sequence: 1,
            total: 1,
            uplink_id: None,
            uid: None,
        }
    }
}

impl CommandMetadataBuilder {
    pub fn payload_string(mut self, payload_string: impl Into<String>) -> Self {
        self.payload_string = Some(payload_string.into());
        self
    }

    pub fn payload_bytes(mut self, payload_bytes: impl Into<Vec<u8>>) -> Self {
        self.payload_bytes = Some(payload_bytes.into());
        self
    }

    pub fn apid(mut self, apid: u32) -> Self {
        self.apid = Some(apid);
        self
    }

    pub fn vcid(mut self, vcid: u8) -> Self {
        self.vcid = vcid;
        self
    }

    pub fn sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn total(mut self, total: u32) -> Self {
        self.total = total;
        self
    }

    pub fn uplink_id(mut self, uplink_id: u64) -> Self {
        self.uplink_id = Some(uplink_id);
        self
    }

    /// Apply configured defaults (currently the virtual channel)
    pub fn with_defaults(mut self, defaults: &Defaults) -> Self {
        self.vcid = defaults.vcid;
        self
    }

    /// Join an existing script group instead of generating a fresh uid
    pub(crate) fn sibling_of(mut self, uid: CommandUid) -> Self {
        self.uid = Some(uid);
        self
    }

    /// Build with the system clock
    ///
    /// # Errors
    ///
    /// Returns `CmdMetaError::InvalidInput` if `sequence` or `total` is zero.
    pub fn build(self) -> Result<CommandMetadata> {
        self.build_with_clock(&SystemClock)
    }

    /// Build with an explicit clock
    ///
    /// # Errors
    ///
    /// Returns `CmdMetaError::InvalidInput` if `sequence` or `total` is zero.
    pub fn build_with_clock(self, clock: &dyn Clock) -> Result<CommandMetadata> {
        if self.sequence == 0 {
            return Err(CmdMetaError::InvalidInput {
                field: "sequence",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.total == 0 {
            return Err(CmdMetaError::InvalidInput {
                field: "total",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(self.assemble(clock))
    }

    fn assemble(self, clock: &dyn Clock) -> CommandMetadata {
        CommandMetadata {
            payload_string: self.payload_string,
            payload_bytes: self.payload_bytes,
            apid: self.apid,
            validity: Validity::default(),
            sequence: self.sequence,
            total: self.total,
            vcid: self.vcid,
            uid: self.uid.unwrap_or_default(),
            uplink_id: self.uplink_id,
            processors: Vec::new(),
            start_time_gps: clock.now(),
            finish_time_gps: None,
        }
    }
}
