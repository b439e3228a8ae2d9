//! Prompts for generating each section of a travel plan.
//!
//! The record prompts pin the model to the exact line-per-field shape that
//! [`crate::pipeline::records`] parses: four lines per restaurant and six per
//! hotel, no Markdown, no separators.

use crate::config::LayoutProfile;
use crate::plan::PlanRequest;

/// Prompt for the day-by-day itinerary.
///
/// The detailed profile also asks for every meal and day part, which keeps
/// the amount of synthesized repair content low.
pub fn itinerary_prompt(request: &PlanRequest, profile: LayoutProfile) -> String {
    let day_parts = match profile {
        LayoutProfile::Classic => "",
        LayoutProfile::Detailed => {
            "- Each day MUST include:\n  Breakfast, Morning, Lunch, Afternoon, Evening Activity, Dinner\n"
        }
    };
    format!(
        "Create a {days}-day travel plan for {destination}.\n\
         Interests: {interests}\n\
         Preferences: {preferences}\n\
         \n\
         Rules:\n\
         - Different activities each day\n\
         - Family friendly where applicable\n\
         - No repetition across days\n\
         - Clear Day-wise structure\n\
         {day_parts}\
         - Do NOT start with words like \"Sure\", \"Here is\", etc.\n",
        days = request.days,
        destination = request.destination.trim(),
        interests = request.interests.trim(),
        preferences = request.preferences.trim(),
    )
}

/// Prompt for three hotels in the six-line record format.
pub fn hotels_prompt(destination: &str, stars: u8) -> String {
    format!(
        "Recommend hotels in {destination}.\n\
         \n\
         Requirements:\n\
         - {stars}-star hotels\n\
         - Provide exactly 3 hotels\n\
         - Do NOT use markdown\n\
         - Do NOT use separators like ---\n\
         \n\
         Format EXACTLY (6 lines per hotel):\n\
         \n\
         Hotel Name\n\
         {rating}\n\
         Short description text\n\
         https://www.expedia.com/Hotel-Search?destination=HOTEL_NAME+DESTINATION\n\
         https://www.hotels.com/Hotel-Search?destination=HOTEL_NAME+DESTINATION\n\
         https://www.booking.com/hotel/...\n",
        destination = destination.trim(),
        rating = "\u{2B50}".repeat(usize::from(stars)),
    )
}

/// Prompt for three restaurants in the four-line record format.
pub fn restaurants_prompt(destination: &str, cuisines: &str) -> String {
    format!(
        "Recommend restaurants in {destination}.\n\
         \n\
         Preferred cuisines: {cuisines}\n\
         \n\
         Rules:\n\
         - Provide exactly 3 restaurants\n\
         - Use REAL restaurant names\n\
         - Do NOT use markdown\n\
         - Do NOT use separators like ---\n\
         - Format EXACTLY as 4 lines per restaurant\n\
         \n\
         Format:\n\
         Restaurant Name\n\
         Cuisine\n\
         Short description\n\
         https://www.yelp.com/search?find_desc=RESTAURANT_NAME&find_loc=DESTINATION\n",
        destination = destination.trim(),
        cuisines = cuisines.trim(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PlanRequest {
        PlanRequest::new(" San Francisco ", 3, "Museums, Food", "Kids friendly")
    }

    #[test]
    fn itinerary_prompt_carries_form_fields() {
        let p = itinerary_prompt(&request(), LayoutProfile::Classic);
        assert!(p.starts_with("Create a 3-day travel plan for San Francisco."));
        assert!(p.contains("Interests: Museums, Food\n"));
        assert!(p.contains("Preferences: Kids friendly\n"));
        assert!(!p.contains("MUST include"));
    }

    #[test]
    fn detailed_itinerary_asks_for_every_part() {
        let p = itinerary_prompt(&request(), LayoutProfile::Detailed);
        assert!(p.contains("Breakfast, Morning, Lunch, Afternoon, Evening Activity, Dinner"));
        assert!(p.trim_end().ends_with("etc."));
    }

    #[test]
    fn hotels_prompt_shows_star_count() {
        let p = hotels_prompt("Lisbon", 4);
        assert!(p.contains("- 4-star hotels"));
        assert!(p.contains("\n\u{2B50}\u{2B50}\u{2B50}\u{2B50}\n"));
        assert!(p.contains("(6 lines per hotel)"));
    }

    #[test]
    fn restaurants_prompt_is_four_lines_per_record() {
        let p = restaurants_prompt("Lisbon", "Seafood");
        assert!(p.contains("Preferred cuisines: Seafood"));
        assert!(p.contains("4 lines per restaurant"));
        assert!(p.contains("yelp.com"));
    }
}
