use macroquad::prelude::Color;

/// Complete palette for one visual theme.
pub struct Theme {
    pub name: &'static str,
    pub gradient_top: Color,
    pub gradient_bottom: Color,
    pub playfield: Color,
    pub playfield_border: Color,
    pub grid: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub accent: Color,
    pub overlay_tint: Color,
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgba(r, g, b, 255)
}

pub fn themes() -> Vec<Theme> {
    let classic_green = Theme {
        name: "Classic Green",
        gradient_top: rgb(16, 64, 32),
        gradient_bottom: rgb(20, 120, 60),
        playfield: rgb(24, 40, 24),
        playfield_border: rgb(70, 170, 90),
        grid: rgb(60, 110, 70),
        snake_head: rgb(240, 250, 90),
        snake_body: rgb(120, 220, 90),
        food: rgb(255, 80, 90),
        text_primary: rgb(235, 250, 230),
        text_secondary: rgb(200, 220, 205),
        accent: rgb(140, 235, 120),
        overlay_tint: Color::from_rgba(10, 30, 15, 180),
    };

    let ocean_blue = Theme {
        name: "Ocean Blue",
        gradient_top: rgb(15, 40, 80),
        gradient_bottom: rgb(25, 120, 180),
        playfield: rgb(18, 55, 95),
        playfield_border: rgb(90, 170, 220),
        grid: rgb(70, 125, 170),
        snake_head: rgb(255, 255, 255),
        snake_body: rgb(120, 200, 255),
        food: rgb(255, 150, 80),
        text_primary: rgb(225, 240, 255),
        text_secondary: rgb(200, 220, 245),
        accent: rgb(140, 210, 255),
        overlay_tint: Color::from_rgba(10, 30, 55, 180),
    };

    let cyberpunk = Theme {
        name: "Cyberpunk",
        gradient_top: rgb(40, 0, 60),
        gradient_bottom: rgb(140, 10, 160),
        playfield: rgb(45, 10, 65),
        playfield_border: rgb(255, 0, 110),
        grid: rgb(120, 45, 150),
        snake_head: rgb(10, 255, 240),
        snake_body: rgb(180, 50, 255),
        food: rgb(255, 70, 180),
        text_primary: rgb(240, 220, 255),
        text_secondary: rgb(215, 200, 230),
        accent: rgb(0, 255, 200),
        overlay_tint: Color::from_rgba(40, 5, 70, 190),
    };

    vec![classic_green, ocean_blue, cyberpunk]
}
