//! The transaction envelope: a fixed big-endian header carrying the
//! economic parameters, followed by the raw payload. `compose` packs one,
//! `parse` unpacks one, applies it and records an execution row.

use crate::context::{BlockContext, Environment, TxInfo};
use crate::error::{ExecError, STATUS_FINISHED, STATUS_VALID};
use crate::executor::apply_transaction;
use crate::gas::Config;
use crate::state::Store;
use log::debug;
use primitive_types::H160;

/// Message-type tag of contract executions.
pub const MESSAGE_TYPE_ID: u32 = 101;
/// Fixed header length after the tag: 32-byte target field and three
/// 8-byte integers.
pub const HEADER_LENGTH: usize = 56;

/// One row of the executions table, persisted per parsed transaction.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionRow {
	pub tx_index: u64,
	pub tx_hash: String,
	pub block_index: u64,
	pub source: String,
	/// Lowercase hex target, absent for creations and unpack failures.
	pub contract_id: Option<String>,
	pub gasprice: Option<u64>,
	pub startgas: Option<u64>,
	pub gas_cost: u128,
	pub gas_remaining: u64,
	pub value: Option<u64>,
	pub payload: Option<Vec<u8>>,
	pub output: Option<Vec<u8>>,
	pub status: String,
}

#[derive(Debug)]
struct Envelope {
	to: Option<H160>,
	gasprice: u64,
	startgas: u64,
	value: u64,
	payload: Vec<u8>,
}

fn read_u64(bytes: &[u8]) -> u64 {
	bytes.iter().fold(0, |acc, byte| (acc << 8) | u64::from(*byte))
}

fn unpack(message: &[u8]) -> Result<Envelope, ExecError> {
	if message.len() < 4 + HEADER_LENGTH {
		return Err(ExecError::Unpack);
	}
	if read_u64(&message[0..4]) != u64::from(MESSAGE_TYPE_ID) {
		return Err(ExecError::Unpack);
	}
	let target_field = &message[4..36];
	let to = if target_field.iter().all(|byte| *byte == 0) {
		None
	} else {
		Some(H160::from_slice(&target_field[12..]))
	};
	Ok(Envelope {
		to,
		gasprice: read_u64(&message[36..44]),
		startgas: read_u64(&message[44..52]),
		value: read_u64(&message[52..60]),
		payload: message[60..].to_vec(),
	})
}

/// Pack an execution envelope. The target is given as 40 lowercase hex
/// characters, or empty for a contract creation. Whether the contract
/// exists is `parse`'s concern, not this one's.
pub fn compose(
	source: H160,
	contract_id_hex: &str,
	gasprice: u64,
	startgas: u64,
	value: u64,
	payload_hex: &str,
) -> Result<Vec<u8>, ExecError> {
	let to = if contract_id_hex.is_empty() {
		None
	} else {
		let bytes = hex::decode(contract_id_hex).map_err(|_| ExecError::Unpack)?;
		if bytes.len() != 20 {
			return Err(ExecError::Unpack);
		}
		Some(H160::from_slice(&bytes))
	};
	let payload = hex::decode(payload_hex).map_err(|_| ExecError::Unpack)?;

	let mut data = Vec::with_capacity(4 + HEADER_LENGTH + payload.len());
	data.extend_from_slice(&MESSAGE_TYPE_ID.to_be_bytes());
	let mut target_field = [0u8; 32];
	if let Some(contract_id) = to {
		target_field[12..].copy_from_slice(contract_id.as_bytes());
	}
	data.extend_from_slice(&target_field);
	data.extend_from_slice(&gasprice.to_be_bytes());
	data.extend_from_slice(&startgas.to_be_bytes());
	data.extend_from_slice(&value.to_be_bytes());
	data.extend_from_slice(&payload);

	debug!(
		"composed execution (source: {:?}, contract_id: {}, gasprice: {}, startgas: {}, value: {})",
		source, contract_id_hex, gasprice, startgas, value
	);
	Ok(data)
}

/// Unpack an envelope, apply the transaction it carries, and append one
/// row to the executions table. Every failure mode lands in the row's
/// status; the returned row is the one recorded.
pub fn parse<S: Store>(
	store: &mut S,
	config: &Config,
	tx: &TxInfo,
	block: &BlockContext,
	message: &[u8],
) -> ExecutionRow {
	let mut row = ExecutionRow {
		tx_index: tx.tx_index,
		tx_hash: hex::encode(tx.tx_hash.as_bytes()),
		block_index: tx.block_index,
		source: hex::encode(tx.source.as_bytes()),
		contract_id: None,
		gasprice: None,
		startgas: None,
		gas_cost: 0,
		gas_remaining: 0,
		value: None,
		payload: None,
		output: None,
		status: STATUS_VALID.to_string(),
	};

	match unpack(message) {
		Err(error) => {
			debug!("{}", error);
			row.status = error.status().to_string();
		}
		Ok(envelope) => {
			row.contract_id = envelope.to.map(|id| hex::encode(id.as_bytes()));
			row.gasprice = Some(envelope.gasprice);
			row.startgas = Some(envelope.startgas);
			row.value = Some(envelope.value);
			row.payload = Some(envelope.payload.clone());

			let env = Environment {
				tx: tx.clone(),
				block: block.clone(),
				gasprice: envelope.gasprice,
				config: *config,
			};
			match apply_transaction(
				store,
				&env,
				envelope.to,
				envelope.startgas,
				envelope.value,
				&envelope.payload,
			) {
				Ok((gas_remaining, output)) => {
					row.status = STATUS_FINISHED.to_string();
					row.gas_remaining = gas_remaining;
					row.gas_cost = u128::from(envelope.gasprice)
						* u128::from(envelope.startgas.saturating_sub(gas_remaining));
					row.output = Some(output);
				}
				Err(error) => {
					debug!("{}", error);
					row.status = error.status().to_string();
					if let ExecError::OutOfGas = error {
						// The down payment stays spent.
						row.gas_cost =
							u128::from(envelope.gasprice) * u128::from(envelope.startgas);
					}
				}
			}
		}
	}

	store.insert_execution(row.clone());
	row
}
