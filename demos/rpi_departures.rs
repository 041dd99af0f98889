#![deny(warnings)]

use embedded_graphics::{
    mono_font::{ascii::FONT_10X20, ascii::FONT_6X10, MonoTextStyleBuilder},
    prelude::*,
    text::{Baseline, Text, TextStyleBuilder},
};
use embedded_hal::delay::DelayNs;
use epd3in7_sign::prelude::*;
use linux_embedded_hal::{
    spidev::{self, SpidevOptions},
    sysfs_gpio::Direction,
    Delay, SpidevDevice, SysfsPin,
};

// The pins in this example are for the Waveshare 3.7" e-Paper HAT on a Raspberry Pi
// activate spi, gpio in raspi-config
// needs to be run with sudo because of some sysfs_gpio permission problems and follow-up timing problems
// see https://github.com/rust-embedded/rust-sysfs-gpio/issues/5 and follow-up issues

const RULE: &str = "------------------------------------------------";

fn main() {
    // CE0 is driven by spidev
    let mut spi = SpidevDevice::open("/dev/spidev0.0").expect("spidev directory");
    let options = SpidevOptions::new()
        .bits_per_word(8)
        .max_speed_hz(SPI_FREQUENCY_HZ)
        .mode(spidev::SpiModeFlags::SPI_MODE_0)
        .build();
    spi.configure(&options).expect("spi configuration");

    let busy = SysfsPin::new(24); // GPIO 24, board J-18
    busy.export().expect("busy export");
    while !busy.is_exported() {}
    busy.set_direction(Direction::In).expect("busy Direction");

    let dc = SysfsPin::new(25); // GPIO 25, board J-22
    dc.export().expect("dc export");
    while !dc.is_exported() {}
    dc.set_direction(Direction::Out).expect("dc Direction");
    dc.set_value(1).expect("dc Value set to 1");

    let rst = SysfsPin::new(17); // GPIO 17, board J-11
    rst.export().expect("rst export");
    while !rst.is_exported() {}
    rst.set_direction(Direction::Out).expect("rst Direction");
    rst.set_value(1).expect("rst Value set to 1");

    let mut sign = DepartureSign::new(spi, busy, dc, rst, Delay {}, Config::default())
        .expect("eink initalize error");

    // stands in for a live departure feed
    let feeds = [
        ["43 Balsta -> 3 min", "40 Uppsala C -> 9 min", "43 Nynashamn -> 14 min"],
        ["43 Balsta -> 2 min", "40 Uppsala C -> 8 min", "43 Nynashamn -> 13 min"],
        ["40 Uppsala C -> 7 min", "43 Nynashamn -> 12 min", "43 Balsta -> 18 min"],
    ];

    let mut delay = Delay {};
    for (minute, trains) in feeds.iter().enumerate() {
        let lines = [
            "SL DEPARTURES",
            RULE,
            trains[0],
            trains[1],
            trains[2],
            RULE,
            "Bus 179 -> 4 min -> 19 min",
        ];
        let drawn = sign.write_lines(&FONT_10X20, 2, &lines);
        println!("update {}: {} lines on the canvas", minute, drawn);

        // embedded-graphics works on the same canvas
        let style = MonoTextStyleBuilder::new()
            .font(&FONT_6X10)
            .text_color(Color::Black)
            .background_color(Color::White)
            .build();
        let text_style = TextStyleBuilder::new().baseline(Baseline::Top).build();
        let _ = Text::with_text_style("demo data", Point::new(2, 2), style, text_style)
            .draw(sign.canvas_mut());

        sign.show().expect("show departures");
        delay.delay_ms(60_000);
    }

    println!("Finished - going to sleep");
    sign.power_down().expect("power down");
}
