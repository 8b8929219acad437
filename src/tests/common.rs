// src/tests/common.rs

//! Common log lines and settings for tests.

#![allow(non_upper_case_globals)]

use crate::common::ParserConfig;
use crate::data::eventkind::EventKindRegistry;

/// A well-formed block hash.
pub const HASH_A: &str = "0f0e0d0c0b0a09080706050403020100f0e0d0c0b0a090807060504030201000";

/// Same as `HASH_A` but uppercase.
pub const HASH_A_UPPER: &str = "0F0E0D0C0B0A09080706050403020100F0E0D0C0B0A090807060504030201000";

/// `2020-01-01 00:00:00` UTC
pub const TS_2020: f64 = 1577836800.0;

pub const LINE_UPDATE_TIP: &str = concat!(
    "LOG 2020-01-01 00:00:00 [node1] UpdateTip: new best=",
    "0f0e0d0c0b0a09080706050403020100f0e0d0c0b0a090807060504030201000",
    " height=100 version=0x20000000 log2_work=90.5 tx=150 date='2020-01-01 00:00:00' progress=1.000000 cache=1.0MiB(150txo)",
);

/// `LINE_UPDATE_TIP` with an impossible month and day.
pub const LINE_UPDATE_TIP_BAD_DATETIME: &str = concat!(
    "LOG 2020-13-45 00:00:00 [node1] UpdateTip: new best=",
    "0f0e0d0c0b0a09080706050403020100f0e0d0c0b0a090807060504030201000",
    " height=100 version=0x20000000 log2_work=90.5 tx=150 date='2020-01-01 00:00:00' progress=1.000000 cache=1.0MiB(150txo)",
);

pub const LINE_TICK: &str =
    "LOG 2020-01-01 00:00:00 [simcoin] [MainThread  ] [INFO ]  The tick started at 1.5 and took 0.25s to finish";

pub const LINE_BLOCK_CREATE: &str =
    "LOG 2020-01-01 00:00:01.250000 [node-2] CreateNewBlock(): total size: 250 block weight: 1000 txs: 3 fees: 0 sigops 400";

pub const LINE_RECEIVED_BLOCK: &str = concat!(
    "LOG 2020-01-01 00:00:02 [node-3] received block ",
    "0f0e0d0c0b0a09080706050403020100f0e0d0c0b0a090807060504030201000",
    " peer=1",
);

pub const LINE_BLOCK_EXCEPTION: &str =
    r#"LOG 2020-01-01 00:00:03 [simcoin] [MainThread  ] [WARNI]  Could not generate block for node=node-4. Exception="Bad address""#;

pub const LINE_RPC_EXCEPTION: &str =
    r#"LOG 2020-01-01 00:00:04 [simcoin] [Thread-1    ] [ERROR]  Node=node-5 could not execute RPC-call=getblock because of error="". Reconnecting RPC and retrying."#;

pub const LINE_MEMPOOL: &str = "LOG 2020-01-01 00:00:05 [node-1] Checking mempool with 2 transactions and 5 inputs";

/// Lines that match no event kind.
pub const LINES_NOISE: &[&str] = &[
    "",
    "LOG 2020-01-01 00:00:00 [node1] Bitcoin Core version v0.15.1 (release build)",
    "LOG 2020-01-01 00:00:00 [node1] UpdateTip: new best=xyz height=1",
    "2020-01-01 00:00:00 [node1] received block 00 peer=0",
    "The tick started at 1.5 and took 0.25s to finish",
    // simulation driver kinds have whole second datetimes
    "LOG 2020-01-01 00:00:00.123456 [simcoin] [MainThread  ] [INFO ]  The tick started at 1.5 and took 0.25s to finish",
];

/// A small aggregated log, one line per `\n`.
pub const LOG_SAMPLE: &str = concat!(
    "LOG 2020-01-01 00:00:00 [simcoin] [MainThread  ] [INFO ]  Starting simulation\n",
    "LOG 2020-01-01 00:00:00 [simcoin] [MainThread  ] [INFO ]  The tick started at 1.5 and took 0.25s to finish\n",
    "LOG 2020-01-01 00:00:01.250000 [node-2] CreateNewBlock(): total size: 250 block weight: 1000 txs: 3 fees: 0 sigops 400\n",
    "LOG 2020-01-01 00:00:00 [node1] UpdateTip: new best=",
    "0f0e0d0c0b0a09080706050403020100f0e0d0c0b0a090807060504030201000",
    " height=100 version=0x20000000 log2_work=90.5 tx=150 date='2020-01-01 00:00:00' progress=1.000000 cache=1.0MiB(150txo)\n",
    "LOG 2020-01-01 00:00:02 [node-3] received block ",
    "0f0e0d0c0b0a09080706050403020100f0e0d0c0b0a090807060504030201000",
    " peer=1\n",
    "LOG 2020-01-01 00:00:02 [node-3] Bitcoin Core version v0.15.1 (release build)\r\n",
    "LOG 2020-01-01 00:00:03 [simcoin] [MainThread  ] [INFO ]  The tick started at 2.5 and took 0.5s to finish\n",
    "LOG 2020-01-01 00:00:05 [node-1] Checking mempool with 2 transactions and 5 inputs",
);

/// Count of lines in `LOG_SAMPLE`.
pub const LOG_SAMPLE_LINES: u64 = 8;

/// Settings for tests; small pool and no progress messages.
pub fn config_test() -> ParserConfig {
    ParserConfig {
        pool_size: 2,
        progress_interval: None,
        ..Default::default()
    }
}

/// A registry of every event kind built with `config_test()`.
pub fn registry_test() -> EventKindRegistry {
    match EventKindRegistry::new(&config_test()) {
        Ok(val) => val,
        Err(err) => panic!("EventKindRegistry::new failed {}", err),
    }
}
