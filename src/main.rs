use std::sync::atomic::AtomicBool;
use anyhow::{Context, Result};
use crate::initialization::init;
use crate::worker::{run, POLL_INTERVAL};

mod alert;
mod config;
mod initialization;
mod logging;
mod manager_location;
mod manager_mail;
mod manager_sms;
mod manager_thingspeak;
mod manager_weather;
mod models;
mod worker;

fn main() -> Result<()> {
    // If initialization fails, logging may not be up yet, so the error goes to stderr.
    let mgr = init().context("Initialization failed")?;

    // Nothing raises the flag; the process runs until it is killed.
    let stop = AtomicBool::new(false);
    run(&mgr, POLL_INTERVAL, &stop);

    Ok(())
}
