//! Kani proof harnesses for the codec and address classifier.
//!
//! # Usage
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani --features kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use std::net::Ipv4Addr;

use crate::{Ipv4Cidr, MAX_PORT, MIN_PORT, filter_port, is_unreserved};

impl kani::Arbitrary for Ipv4Cidr {
    fn any() -> Self {
        let bits: u32 = kani::any();
        let prefix_len: u8 = kani::any();
        Self::new(Ipv4Addr::from_bits(bits), prefix_len)
    }
}

#[kani::proof]
fn proof_filter_port_accepts_exactly_valid_range() {
    let value: i64 = kani::any();
    let result = filter_port(Some(value));
    if (MIN_PORT..=MAX_PORT).contains(&value) {
        assert_eq!(result.ok().flatten().map(i64::from), Some(value));
    } else {
        assert!(result.is_err());
    }
}

#[kani::proof]
fn proof_filter_port_passes_none() {
    assert!(matches!(filter_port(None), Ok(None)));
}

#[kani::proof]
fn proof_cidr_contains_its_network() {
    let range: Ipv4Cidr = kani::any();
    assert!(range.prefix_len() <= 32);
    assert!(range.contains(range.network()));
}

#[kani::proof]
fn proof_zero_prefix_contains_everything() {
    let network: u32 = kani::any();
    let addr: u32 = kani::any();
    let range = Ipv4Cidr::new(Ipv4Addr::from_bits(network), 0);
    assert!(range.contains(Ipv4Addr::from_bits(addr)));
}

#[kani::proof]
fn proof_unreserved_is_ascii() {
    let byte: u8 = kani::any();
    if is_unreserved(byte) {
        assert!(byte.is_ascii_graphic());
        assert!(!matches!(byte, b'%' | b'/' | b'?' | b'#' | b'&' | b'='));
    }
}
