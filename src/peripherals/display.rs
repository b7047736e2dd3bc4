//! Display control module for PineTime

use embassy_nrf::{
    gpio::Output,
    peripherals::{P0_18, P0_25, P0_26},
    spim::{self, Spim},
};

use display_interface_spi::SPIInterface;
use embassy_time::Delay;
use embedded_graphics::{
    mono_font::{MonoTextStyle, MonoTextStyleBuilder},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle, Triangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use mipidsi::{models::ST7789, Builder, Orientation};
use pinetime_watchface::ui::{DisplaySink, IconTier, TextRegion, Visibility};
use profont::{PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

const LCD_W: u16 = 240;
const LCD_H: u16 = 240;

const BACKGROUND_COLOR: Rgb565 = Rgb565::BLACK;
const FOREGROUND_COLOR: Rgb565 = Rgb565::new(0x1d, 0x3b, 0x1d);
const BLUETOOTH_COLOR: Rgb565 = Rgb565::new(0x04, 0x20, 0x1f);

/// Battery glyph outline, the terminal nub sits on its right
const BATTERY_ICON: Rectangle = Rectangle::new(Point::new(188, 8), Size::new(40, 18));
const BLUETOOTH_ICON: Rectangle = Rectangle::new(Point::new(150, 8), Size::new(28, 18));

type Lcd<'a, SPI> = mipidsi::Display<
    SPIInterface<Spim<'a, SPI>, Output<'a, P0_18>, Output<'a, P0_25>>,
    ST7789,
    Output<'a, P0_26>,
>;

pub struct Display<'a, SPI>
where
    SPI: spim::Instance,
{
    lcd: Lcd<'a, SPI>,
}

impl<'a, SPI> Display<'a, SPI>
where
    SPI: spim::Instance,
{
    /// Initialize the display
    pub fn init(
        spim: Spim<'a, SPI>,
        cs: Output<'a, P0_25>,
        dc: Output<'a, P0_18>,
        rst: Output<'a, P0_26>,
        delay: &mut Delay,
    ) -> Result<Self, Error> {
        let lcd = Builder::st7789(SPIInterface::new(spim, dc, cs))
            .with_display_size(LCD_W, LCD_H)
            .with_orientation(Orientation::Portrait(false))
            .init(delay, Some(rst))
            .map_err(|_| Error::Init)?;

        let mut display = Self { lcd };
        display.lcd.clear(BACKGROUND_COLOR)?;
        Ok(display)
    }

    fn draw_text(
        &mut self,
        text: &str,
        bounds: Rectangle,
        style: MonoTextStyle<'static, Rgb565>,
        alignment: Alignment,
    ) -> Result<(), Error> {
        // Wipe the old text first, glyph widths differ between updates
        bounds
            .into_styled(PrimitiveStyle::with_fill(BACKGROUND_COLOR))
            .draw(&mut self.lcd)?;

        let anchor = match alignment {
            Alignment::Left => Point::new(bounds.top_left.x, bounds.center().y),
            _ => bounds.center(),
        };
        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(text, anchor, style, text_style).draw(&mut self.lcd)?;
        Ok(())
    }
}

impl<SPI> DisplaySink for Display<'_, SPI>
where
    SPI: spim::Instance,
{
    type Error = Error;

    fn set_text(&mut self, region: TextRegion, text: &str) -> Result<(), Error> {
        let (bounds, font, alignment) = match region {
            TextRegion::Time => (
                Rectangle::new(Point::new(0, 50), Size::new(LCD_W as u32, 60)),
                &PROFONT_24_POINT,
                Alignment::Center,
            ),
            TextRegion::Seconds => (
                Rectangle::new(Point::new(0, 115), Size::new(LCD_W as u32, 40)),
                &PROFONT_18_POINT,
                Alignment::Center,
            ),
            TextRegion::Date => (
                Rectangle::new(Point::new(0, 170), Size::new(LCD_W as u32, 40)),
                &PROFONT_18_POINT,
                Alignment::Center,
            ),
            TextRegion::Battery => (
                Rectangle::new(Point::new(8, 4), Size::new(110, 26)),
                &PROFONT_14_POINT,
                Alignment::Left,
            ),
        };
        let style = MonoTextStyleBuilder::new()
            .font(font)
            .text_color(FOREGROUND_COLOR)
            .background_color(BACKGROUND_COLOR)
            .build();
        self.draw_text(text, bounds, style, alignment)
    }

    fn set_battery_icon(&mut self, tier: IconTier) -> Result<(), Error> {
        let outline = BATTERY_ICON;
        let nub = Rectangle::new(
            Point::new(outline.top_left.x + outline.size.width as i32, outline.top_left.y + 5),
            Size::new(3, 8),
        );
        outline
            .into_styled(PrimitiveStyle::with_fill(BACKGROUND_COLOR))
            .draw(&mut self.lcd)?;
        outline
            .into_styled(PrimitiveStyle::with_stroke(FOREGROUND_COLOR, 2))
            .draw(&mut self.lcd)?;
        nub.into_styled(PrimitiveStyle::with_fill(FOREGROUND_COLOR))
            .draw(&mut self.lcd)?;

        // Five segments inside the outline
        let inner = outline.offset(-4);
        let segment_w = inner.size.width / 5;
        for i in 0..tier.segments() as u32 {
            Rectangle::new(
                inner.top_left + Point::new((i * segment_w) as i32, 0),
                Size::new(segment_w - 1, inner.size.height),
            )
            .into_styled(PrimitiveStyle::with_fill(FOREGROUND_COLOR))
            .draw(&mut self.lcd)?;
        }

        if tier == IconTier::Charging {
            // Lightning bolt cut out of the full battery
            let c = outline.center();
            Triangle::new(c + Point::new(2, -8), c + Point::new(-6, 1), c + Point::new(1, 1))
                .into_styled(PrimitiveStyle::with_fill(BACKGROUND_COLOR))
                .draw(&mut self.lcd)?;
            Triangle::new(c + Point::new(-2, 8), c + Point::new(6, -1), c + Point::new(-1, -1))
                .into_styled(PrimitiveStyle::with_fill(BACKGROUND_COLOR))
                .draw(&mut self.lcd)?;
        }
        Ok(())
    }

    fn set_bluetooth_icon(&mut self, visibility: Visibility) -> Result<(), Error> {
        match visibility {
            Visibility::Visible => {
                let style = MonoTextStyleBuilder::new()
                    .font(&PROFONT_14_POINT)
                    .text_color(BLUETOOTH_COLOR)
                    .background_color(BACKGROUND_COLOR)
                    .build();
                self.draw_text("BT", BLUETOOTH_ICON, style, Alignment::Center)
            }
            Visibility::Hidden => {
                BLUETOOTH_ICON
                    .into_styled(PrimitiveStyle::with_fill(BACKGROUND_COLOR))
                    .draw(&mut self.lcd)?;
                Ok(())
            }
        }
    }
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    /// Display controller did not come up
    Init,
    /// SPI transfer to the display failed
    Draw,
}

impl From<mipidsi::Error> for Error {
    fn from(_: mipidsi::Error) -> Self {
        Self::Draw
    }
}
