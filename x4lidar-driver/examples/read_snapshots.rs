use clap::{Arg, Command};
use x4lidar_driver::{ScanConfig, ScanSession};

fn get_port_name() -> String {
    let matches = Command::new("Lidar snapshot reader.")
        .about("Prints per-degree range snapshots read from a sensor.")
        .disable_version_flag(true)
        .arg(
            Arg::new("port")
                .help("The device path to a serial port")
                .use_value_delimiter(false)
                .required(true),
        )
        .get_matches();

    let port_name: &String = matches.get_one("port").unwrap();
    port_name.to_string()
}

fn main() {
    let port_name = get_port_name();

    let mut session = ScanSession::new(ScanConfig::new(port_name));
    session.connect().expect("could not open the sensor port");

    let mut scans = session.start_scanning().expect("could not start scanning");
    for _ in 0..30 {
        match scans.next() {
            Some(Ok(snapshot)) => {
                let covered = snapshot.measured().count();
                let nearest = snapshot.measured().map(|(_, distance)| distance).min();
                println!("covered {covered:>3}/360 degrees, nearest {nearest:?}");
            }
            Some(Err(err)) => {
                eprintln!("{err}");
                break;
            }
            None => break,
        }
    }
    drop(scans);

    session.disconnect().expect("could not close the session");
}
