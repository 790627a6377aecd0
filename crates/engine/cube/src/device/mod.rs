//! Board glue: LED output, cloud link hooks, switches and sensors
//!
//! Nothing here talks to hardware directly. A board layer implements
//! [`LedStrip`] and [`CloudLink`] and forwards pin edges to [`ModeSwitches`].

pub mod strip;

pub use strip::{LedStrip, MemoryStrip, NullStrip};

use std::fmt;
use std::net::Ipv4Addr;

/// UDP port frames are streamed to unless reconfigured.
pub const STREAMING_PORT: u16 = 2222;
/// Edge length of the stock cube.
pub const DEFAULT_SIZE: u32 = 8;
/// Brightness cap of the stock cube.
pub const DEFAULT_MAX_BRIGHTNESS: u8 = 50;
/// How often the cube refreshes its own network info while streaming.
pub const NETWORK_REFRESH_SECS: u64 = 60;

/// Requests the cube makes of its cloud/WiFi stack.
pub trait CloudLink {
    fn connect(&mut self);
    fn disconnect(&mut self);
    /// Enter WiFi credential listening mode.
    fn listen_wifi(&mut self);
}

/// State of the online/offline switch and the WiFi-join button.
///
/// The switch and button are wired as pull-ups, so a pressed input reads
/// low. The handlers only flip these two flags and call the link; they never
/// touch the framebuffer and need no locking against drawing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSwitches {
    online_pressed: bool,
    last_online: bool,
}

impl Default for ModeSwitches {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeSwitches {
    pub const fn new() -> Self {
        Self {
            online_pressed: false,
            last_online: true,
        }
    }

    pub fn online_pressed(&self) -> bool {
        self.online_pressed
    }

    pub fn last_online(&self) -> bool {
        self.last_online
    }

    /// Sample both inputs at startup.
    ///
    /// With the mode button held the cube enters WiFi listening; with the
    /// switch pressed it connects right away.
    pub fn begin<L: CloudLink>(&mut self, internet_pin_high: bool, mode_pin_high: bool, link: &mut L) {
        if !mode_pin_high {
            link.listen_wifi();
        }
        self.online_pressed = !internet_pin_high;
        if self.online_pressed {
            link.connect();
        }
    }

    /// Handle a change edge on the online/offline switch.
    pub fn on_online_switch<L: CloudLink>(&mut self, internet_pin_high: bool, link: &mut L) {
        self.online_pressed = !internet_pin_high;

        if !self.online_pressed && self.last_online {
            link.connect();
        } else if self.online_pressed && !self.last_online {
            link.disconnect();
        }

        self.last_online = self.online_pressed;
    }

    /// Handle a falling edge on the WiFi-join button.
    pub fn on_join_wifi<L: CloudLink>(&mut self, link: &mut L) {
        link.listen_wifi();
    }
}

/// What the cube reports about itself to the cloud.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    pub local_ip: String,
    pub mac_address: String,
    pub port: u16,
}

impl NetworkInfo {
    pub fn new(ip: Ipv4Addr, mac: [u8; 6], port: u16) -> Self {
        Self {
            local_ip: ip.to_string(),
            mac_address: format_mac(mac),
            port,
        }
    }
}

impl fmt::Display for NetworkInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} ({})", self.local_ip, self.port, self.mac_address)
    }
}

/// Format a MAC address as the WiFi module reports it: lower-case hex, most
/// significant byte last in memory, so the bytes are printed in reverse.
pub fn format_mac(mac: [u8; 6]) -> String {
    format!(
        "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
        mac[5], mac[4], mac[3], mac[2], mac[1], mac[0]
    )
}

/// Parse a port number the way the cloud `setPort` function does.
///
/// Leading whitespace and a sign are accepted, parsing stops at the first
/// non-digit, and text with no leading digits yields 0. Like a 32-bit
/// `atol`, the value saturates at the `i32` range, then it is narrowed to 16
/// bits without range checking.
pub fn parse_port(text: &str) -> u16 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add((d - b'0') as i64));

    let value = if negative { -value } else { value };
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32 as u16
}

// Reported angles have always been scaled with 3.14 rather than pi.
#[allow(clippy::approx_constant)]
const DEGREES_PER_RADIAN: f64 = 180.0 / 3.14;

/// Tilt angles derived from the three-axis accelerometer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    /// Bias-corrected readings.
    pub x: i32,
    pub y: i32,
    pub z: i32,
    /// Rotation about the y axis, in degrees.
    pub theta: f64,
    /// Rotation about the x axis, in degrees.
    pub phi: f64,
}

impl Tilt {
    /// DC bias of the 12-bit ADC readings.
    pub const ADC_BIAS: i32 = 2048;

    /// Compute tilt from raw ADC readings.
    pub fn from_adc(raw_x: i32, raw_y: i32, raw_z: i32) -> Self {
        let x = raw_x - Self::ADC_BIAS;
        let y = raw_y - Self::ADC_BIAS;
        let z = raw_z - Self::ADC_BIAS;
        let (xf, yf, zf) = (x as f64, y as f64, z as f64);

        let theta = (xf / (yf * yf + zf * zf).sqrt()).atan() * DEGREES_PER_RADIAN;
        let phi = (yf / (xf * xf + zf * zf).sqrt()).atan() * DEGREES_PER_RADIAN;

        Self {
            x,
            y,
            z,
            theta,
            phi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingLink {
        calls: Vec<&'static str>,
    }

    impl CloudLink for RecordingLink {
        fn connect(&mut self) {
            self.calls.push("connect");
        }
        fn disconnect(&mut self) {
            self.calls.push("disconnect");
        }
        fn listen_wifi(&mut self) {
            self.calls.push("listen");
        }
    }

    #[test]
    fn test_begin_samples_inputs() {
        let mut link = RecordingLink::default();
        let mut switches = ModeSwitches::new();
        switches.begin(true, true, &mut link);
        assert!(link.calls.is_empty());
        assert!(!switches.online_pressed());

        let mut link = RecordingLink::default();
        let mut switches = ModeSwitches::new();
        switches.begin(false, false, &mut link);
        assert_eq!(link.calls, vec!["listen", "connect"]);
        assert!(switches.online_pressed());
    }

    #[test]
    fn test_switch_transitions() {
        let mut link = RecordingLink::default();
        let mut switches = ModeSwitches::new();
        assert!(switches.last_online());

        // Pin high: not pressed while last_online is set -> connect
        switches.on_online_switch(true, &mut link);
        assert_eq!(link.calls, vec!["connect"]);
        assert!(!switches.last_online());

        // Same level again: nothing to do
        switches.on_online_switch(true, &mut link);
        assert_eq!(link.calls, vec!["connect"]);

        // Pin low: pressed while last_online is clear -> disconnect
        switches.on_online_switch(false, &mut link);
        assert_eq!(link.calls, vec!["connect", "disconnect"]);
        assert!(switches.last_online());

        switches.on_online_switch(false, &mut link);
        assert_eq!(link.calls.len(), 2);
    }

    #[test]
    fn test_join_wifi() {
        let mut link = RecordingLink::default();
        let mut switches = ModeSwitches::new();
        switches.on_join_wifi(&mut link);
        assert_eq!(link.calls, vec!["listen"]);
        assert_eq!(switches, ModeSwitches::new());
    }

    #[test]
    fn test_network_info_formatting() {
        let info = NetworkInfo::new(
            Ipv4Addr::new(192, 168, 1, 42),
            [0x01, 0x02, 0x03, 0xaa, 0xbb, 0xcc],
            STREAMING_PORT,
        );
        assert_eq!(info.local_ip, "192.168.1.42");
        assert_eq!(info.mac_address, "cc:bb:aa:03:02:01");
        assert_eq!(info.to_string(), "192.168.1.42:2222 (cc:bb:aa:03:02:01)");
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("2222"), 2222);
        assert_eq!(parse_port("  3333"), 3333);
        assert_eq!(parse_port("+80"), 80);
        assert_eq!(parse_port("4000abc"), 4000);
        assert_eq!(parse_port("abc"), 0);
        assert_eq!(parse_port(""), 0);
        assert_eq!(parse_port("-"), 0);
        // no range check: 65536 wraps to 0, -1 to 65535
        assert_eq!(parse_port("65536"), 0);
        assert_eq!(parse_port("-1"), 65535);
    }

    #[test]
    fn test_parse_port_saturates_at_32_bits() {
        // i32::MAX = 0x7fff_ffff and i32::MIN = 0x8000_0000 narrowed to 16 bits
        assert_eq!(parse_port("2147483647"), 65535);
        assert_eq!(parse_port("4294967296"), 65535);
        assert_eq!(parse_port("99999999999999999999999999"), 65535);
        assert_eq!(parse_port("-2147483649"), 0);
        assert_eq!(parse_port("-99999999999999999999999999"), 0);
    }

    #[test]
    fn test_tilt_level() {
        let level = Tilt::from_adc(2048, 2048, 3048);
        assert_eq!(level.z, 1000);
        assert_eq!(level.theta, 0.0);
        assert_eq!(level.phi, 0.0);

        let tipped = Tilt::from_adc(3048, 2048, 3048);
        // atan(1) = pi/4, scaled with 180/3.14
        assert!((tipped.theta - 45.0 * std::f64::consts::PI / 3.14).abs() < 1e-9);
    }
}
