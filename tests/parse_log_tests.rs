// tests/parse_log_tests.rs

//! Run the whole pipeline through the public API of _sxlib_.

#![allow(non_snake_case)]

extern crate sxlib;

use std::io::Write;

use sxlib::common::ParserConfig;
use sxlib::data::eventkind::{EventKindId, EventKindRegistry, EVENT_KIND_COUNT};
use sxlib::readers::parsedriver::ParseDriver;

use ::tempfile::{Builder, NamedTempFile, TempDir};

const LOG: &str = concat!(
    "LOG 2020-01-01 00:00:00 [simcoin] [MainThread  ] [INFO ]  The tick started at 1.5 and took 0.25s to finish\n",
    "LOG 2020-01-01 00:00:00.500000 [node-1] AddToWallet ",
    "aa00000000000000000000000000000000000000000000000000000000000000",
    "  new\n",
    "LOG 2020-01-01 00:00:01 [node-2] AcceptToMemoryPool: peer=0: accepted ",
    "aa00000000000000000000000000000000000000000000000000000000000000",
    " (poolsz 1 txn, 1 kB)\n",
    "LOG 2020-01-01 00:00:02 [simcoin] [Thread-3    ] [WARNI]  Could not generate tx for node=node-3. Exception=\"no funds\"\n",
    "unrelated line\n",
);

fn log_file(data: &str) -> NamedTempFile {
    let mut ntf = Builder::new().prefix("tmp-sx-itest-").tempfile().unwrap();
    ntf.write_all(data.as_bytes()).unwrap();
    ntf.flush().unwrap();

    ntf
}

fn out_dir() -> TempDir {
    Builder::new().prefix("tmp-sx-itest-").tempdir().unwrap()
}

#[test]
fn test_parse_log_all_kinds() {
    let ntf = log_file(LOG);
    let dir = out_dir();
    let config = ParserConfig {
        pool_size: 4,
        progress_interval: None,
        ..Default::default()
    };
    let registry = EventKindRegistry::new(&config).unwrap();
    let driver = ParseDriver::new(registry, config);
    let report = driver.run(ntf.path(), dir.path(), "it").unwrap();
    assert!(report.is_ok(), "{}", report);
    assert_eq!(report.outcomes.len(), EVENT_KIND_COUNT);
    assert_eq!(report.events(), 4);

    let txs = std::fs::read_to_string(dir.path().join("txs_it.csv")).unwrap();
    assert_eq!(
        txs,
        "timestamp;node;hash\r\n1577836800.5;node-1;aa00000000000000000000000000000000000000000000000000000000000000\r\n"
    );
    let exceptions = std::fs::read_to_string(dir.path().join("tx_exceptions_it.csv")).unwrap();
    assert_eq!(exceptions, "timestamp;node;exception\r\n1577836802.0;node-3;no funds\r\n");
    let received = report.get(EventKindId::TxReceived).unwrap();
    assert_eq!(received.summary().unwrap().lines, 5);
}

#[test]
fn test_parse_log_bad_output_dir() {
    let ntf = log_file(LOG);
    let dir = out_dir();
    let config = ParserConfig::default();
    let registry = EventKindRegistry::new(&config).unwrap();
    let result = ParseDriver::new(registry, config).run(ntf.path(), &dir.path().join("missing"), "");
    assert!(result.is_err());
}
