// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Example: build a tensor from a nested literal and index it three ways.
//!
//! ```bash
//! RUST_LOG=debug cargo run -p nd-tensor --example nested_demo
//! ```

use nd_tensor::{nested, SliceSpec, Tensor, TensorConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let t: Tensor<f64> = Tensor::from_nested(&nested![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]])?;
    println!("{t}");
    println!("t[0, 1]   = {}", t.get_at(&[0, 1])?);
    println!("t[5]      = {}", t.get(5)?);
    println!("t[1:3]    = {}", t.slice(1usize..3)?);
    println!("t[::-2]   = {}", t.slice(SliceSpec::full().with_step(-2))?);

    // Policy can come from a TOML file; here it is inline.
    let config = TensorConfig::from_toml("empty_input = \"reject\"")?;
    match Tensor::<f64>::from_nested_with(&nested![], &config) {
        Ok(t) => println!("unexpected: {t}"),
        Err(e) => println!("rejected: {e}"),
    }

    let filled: Tensor<i32> = Tensor::filled(4, 0);
    println!("{filled}");

    let parsed: Tensor<i64> = Tensor::from_json("[[[1, 2], [3, 4]], [[5, 6], [7, 8]]]")?;
    println!("{parsed} strides={:?}", parsed.strides());
    Ok(())
}
