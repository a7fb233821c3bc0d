use std::error::Error;
use std::sync::Arc;

use clap::Parser;

use memdev::core::{
    DeviceConfig, DeviceService, DEVICE_NAME, IOCTL_READ_SCALAR, IOCTL_WRITE_SCALAR,
};
use memdev::params::ParameterStore;
use memdev::session::DeviceSession;

#[derive(clap::Parser)]
#[clap()]
struct Opts {
    #[clap(short = 'c', long = "config", default_value = "memdev.toml")]
    config: String,
    /// Integer to push through the control channel.
    value: i32,
    /// Optional textual update for the observed parameter, the analogue of
    /// writing the parameter file after load.
    #[clap(long = "observed")]
    observed: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let opts: Opts = Opts::parse();
    let cfg: DeviceConfig = confy::load_path(&opts.config)?;

    let mut params = ParameterStore::new(&cfg);
    if let Some(raw) = &opts.observed {
        params.set_observed(raw)?;
        println!("observed_param = {}", params.get_observed());
    }

    let service = Arc::new(DeviceService::new());
    let session = &mut DeviceSession::new(service);

    println!("Opening device {}", DEVICE_NAME);
    session.open()?;

    println!("Writing input to device");
    let mut arg = opts.value;
    session.control(IOCTL_WRITE_SCALAR, &mut arg)?;

    println!("Reading data from device");
    let mut val = 0i32;
    session.control(IOCTL_READ_SCALAR, &mut val)?;
    println!("val = {}", val);

    session.release()?;
    Ok(())
}
