//! Benchmark helper utilities for flashback-rs
//!
//! This module generates synthetic Bytekiller payloads so the decoder
//! benchmarks do not depend on game data being present. The packer only
//! emits literal runs, which is enough to drive the bit reader and the
//! backward copy loop at full tilt.

/// Packs a payload into a valid Bytekiller buffer using literal runs only.
///
/// The result decodes back to `payload` with a zero CRC residual. Literal
/// packing inflates the data (the probe heuristic will not fire on it);
/// benchmarks feed the result straight to the decoder.
pub fn pack_literals(payload: &[u8]) -> Vec<u8> {
	// Consumption-order bit list. The decoder writes its output backwards,
	// so literal bytes are emitted last-first.
	let mut bits: Vec<u8> = Vec::with_capacity(payload.len() * 9);

	fn push_value(bits: &mut Vec<u8>, value: u32, count: u32) {
		for i in (0..count).rev() {
			bits.push(((value >> i) & 1) as u8);
		}
	}

	let mut rest = payload;
	while !rest.is_empty() {
		let run = rest.len().min(264);
		let (head, tail) = rest.split_at(rest.len() - run);
		if run >= 9 {
			push_value(&mut bits, 0b111, 3);
			push_value(&mut bits, (run - 9) as u32, 8);
		} else {
			push_value(&mut bits, 0b00, 2);
			push_value(&mut bits, (run - 1) as u32, 3);
		}
		for &byte in tail.iter().rev() {
			push_value(&mut bits, u32::from(byte), 8);
		}
		rest = head;
	}

	// Split into the priming word (total mod 32 bits below a sentinel) and
	// full 32-bit code words. In the file the words sit in reverse
	// consumption order: the decoder reads them from the high end down.
	fn pack_word(chunk: &[u8]) -> u32 {
		chunk.iter().enumerate().fold(0u32, |acc, (i, &b)| acc | (u32::from(b) << i))
	}

	let prime_len = bits.len() % 32;
	let prime = (1u32 << prime_len) | pack_word(&bits[..prime_len]);
	let words: Vec<u32> = bits[prime_len..].chunks(32).map(pack_word).collect();

	let seed = words.iter().fold(prime, |acc, w| acc ^ w);

	let mut data = Vec::with_capacity(words.len() * 4 + 12);
	for word in words.iter().rev() {
		data.extend_from_slice(&word.to_be_bytes());
	}
	data.extend_from_slice(&prime.to_be_bytes());
	data.extend_from_slice(&seed.to_be_bytes());
	data.extend_from_slice(&(payload.len() as u32).to_be_bytes());
	data
}

/// Deterministic pseudo-random payload for benchmarking.
pub fn synthetic_payload(len: usize) -> Vec<u8> {
	let mut state = 0x2F6E_2B1Du32;
	(0..len)
		.map(|_| {
			state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
			(state >> 24) as u8
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use flashback_types::file::bytekiller;

	#[test]
	fn packed_payload_round_trips() {
		for len in [1, 8, 9, 264, 265, 1000] {
			let payload = synthetic_payload(len);
			let packed = pack_literals(&payload);
			assert_eq!(bytekiller::unpack(&packed).unwrap(), payload, "len {len}");
		}
	}
}
