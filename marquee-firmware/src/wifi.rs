//! CYW43439 radio and network stack
//!
//! The radio sits on a PIO-driven SPI bus (GP23 power, GP24 data,
//! GP25 chip select, GP29 clock). DHCP provides the address.

use cyw43::{JoinOptions, PowerManagementMode};
use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::*;
use embassy_executor::Spawner;
use embassy_net::{Ipv4Address, Stack, StackResources};
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{DMA_CH0, PIN_23, PIN_24, PIN_25, PIN_29, PIO0};
use embassy_rp::pio::Pio;
use embassy_rp::Peri;
use embassy_time::{with_timeout, Duration, Timer};
use static_cell::StaticCell;

use crate::config;
use crate::Irqs;

/// Sockets the stack can hold: the listener plus DHCP and DNS
const SOCKET_COUNT: usize = 3;

/// Fixed seed; the stack only uses it for ports and sequence numbers
const NET_SEED: u64 = 0x6d61_7271_7565_6521;

static CYW43_STATE: StaticCell<cyw43::State> = StaticCell::new();
static NET_RESOURCES: StaticCell<StackResources<SOCKET_COUNT>> = StaticCell::new();

type RadioSpi = PioSpi<'static, PIO0, 0, DMA_CH0>;

/// Pins and peripherals owned by the radio
pub struct RadioPins {
    pub pio: Peri<'static, PIO0>,
    pub dma: Peri<'static, DMA_CH0>,
    pub pwr: Peri<'static, PIN_23>,
    pub dio: Peri<'static, PIN_24>,
    pub cs: Peri<'static, PIN_25>,
    pub clk: Peri<'static, PIN_29>,
}

/// Radio control handle and network stack
pub struct Network {
    pub control: cyw43::Control<'static>,
    pub stack: Stack<'static>,
}

#[embassy_executor::task]
async fn cyw43_task(runner: cyw43::Runner<'static, Output<'static>, RadioSpi>) -> ! {
    runner.run().await
}

#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}

/// Power up the radio and start the network stack
pub async fn start(spawner: Spawner, pins: RadioPins) -> Network {
    let fw = include_bytes!("../cyw43-firmware/43439A0.bin");
    let clm = include_bytes!("../cyw43-firmware/43439A0_clm.bin");

    let pwr = Output::new(pins.pwr, Level::Low);
    let cs = Output::new(pins.cs, Level::High);
    let mut pio = Pio::new(pins.pio, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        pins.dio,
        pins.clk,
        pins.dma,
    );

    let state = CYW43_STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;
    spawner.spawn(unwrap!(cyw43_task(runner)));

    control.init(clm).await;
    control
        .set_power_management(PowerManagementMode::PowerSave)
        .await;
    info!("Radio up");

    let (stack, runner) = embassy_net::new(
        net_device,
        embassy_net::Config::dhcpv4(Default::default()),
        NET_RESOURCES.init(StackResources::new()),
        NET_SEED,
    );
    spawner.spawn(unwrap!(net_task(runner)));

    Network { control, stack }
}

/// Join the configured network and wait for a DHCP lease
///
/// Tries `CONNECT_ATTEMPTS` times, `RETRY_INTERVAL_MS` apart. The lease
/// must arrive within the same overall budget.
pub async fn connect(network: &mut Network) -> Option<Ipv4Address> {
    let retry = Duration::from_millis(config::RETRY_INTERVAL_MS);

    info!("Joining '{}'", config::WIFI_SSID);
    let mut joined = false;
    for attempt in 1..=config::CONNECT_ATTEMPTS {
        match network.control.join(config::WIFI_SSID, join_options()).await {
            Ok(()) => {
                joined = true;
                break;
            }
            Err(e) => {
                debug!(
                    "Join attempt {}/{} failed, status {}",
                    attempt,
                    config::CONNECT_ATTEMPTS,
                    e.status
                );
                Timer::after(retry).await;
            }
        }
    }
    if !joined {
        warn!("Could not join '{}'", config::WIFI_SSID);
        return None;
    }

    let lease_budget = retry * config::CONNECT_ATTEMPTS as u32;
    if with_timeout(lease_budget, network.stack.wait_config_up())
        .await
        .is_err()
    {
        warn!("No DHCP lease");
        return None;
    }

    let address = network.stack.config_v4()?.address.address();
    info!("Network up, address {}", Display2Format(&address));
    Some(address)
}

fn join_options() -> JoinOptions<'static> {
    if config::WIFI_PASSWORD.is_empty() {
        JoinOptions::new_open()
    } else {
        JoinOptions::new(config::WIFI_PASSWORD.as_bytes())
    }
}
