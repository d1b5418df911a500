use weather_core::WeatherResult;

const RULE_WIDTH: usize = 50;

/// Framed, multi-line block for terminal output.
pub fn render_weather(result: &WeatherResult) -> String {
    let rule = "=".repeat(RULE_WIDTH);

    format!(
        "\n{rule}\n\
         Location: {}, {}\n\
         Temperature: {}\n\
         Condition: {}\n\
         Humidity: {}\n\
         Wind Speed: {}\n\
         Last Updated: {}\n\
         {rule}\n",
        result.city,
        result.country,
        result.temperature,
        result.condition,
        result.humidity,
        result.wind_speed,
        result.last_updated,
    )
}
