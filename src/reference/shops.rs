use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::models::{RepairShop, Weekday};

static SHOPS: OnceLock<Vec<RepairShop>> = OnceLock::new();

/// The static repair shop directory.
pub fn repair_shops() -> &'static [RepairShop] {
    SHOPS.get_or_init(build_directory)
}

pub fn repair_shop(id: &str) -> Option<&'static RepairShop> {
    repair_shops().iter().find(|shop| shop.id == id)
}

fn weekday_hours(weekday: &str, saturday: &str, sunday: &str) -> BTreeMap<Weekday, String> {
    BTreeMap::from([
        (Weekday::Monday, weekday.to_string()),
        (Weekday::Tuesday, weekday.to_string()),
        (Weekday::Wednesday, weekday.to_string()),
        (Weekday::Thursday, weekday.to_string()),
        (Weekday::Friday, weekday.to_string()),
        (Weekday::Saturday, saturday.to_string()),
        (Weekday::Sunday, sunday.to_string()),
    ])
}

fn shop(
    id: &str,
    name: &str,
    address: &str,
    phone: &str,
    email: &str,
    rating: f64,
    specialties: &[&str],
    certifications: &[&str],
    hours: BTreeMap<Weekday, String>,
) -> RepairShop {
    RepairShop {
        id: id.into(),
        name: name.into(),
        address: address.into(),
        phone: phone.into(),
        email: email.into(),
        rating,
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        certifications: certifications.iter().map(|s| s.to_string()).collect(),
        hours,
    }
}

fn build_directory() -> Vec<RepairShop> {
    vec![
        shop(
            "shop-001",
            "Precision Auto Body",
            "1420 Industrial Way, Springfield",
            "555-0110",
            "service@precisionautobody.example",
            4.8,
            &["Collision repair", "Frame straightening", "Paint matching"],
            &["I-CAR Gold Class", "ASE Certified"],
            weekday_hours("8:00 AM - 6:00 PM", "9:00 AM - 2:00 PM", "Closed"),
        ),
        shop(
            "shop-002",
            "Riverside Collision Center",
            "88 River Rd, Springfield",
            "555-0123",
            "intake@riversidecollision.example",
            4.6,
            &["Collision repair", "Glass replacement", "Dent removal"],
            &["I-CAR Platinum", "OEM Certified (Honda, Toyota)"],
            weekday_hours("7:30 AM - 5:30 PM", "8:00 AM - 12:00 PM", "Closed"),
        ),
        shop(
            "shop-003",
            "Metro Glass & Trim",
            "301 Commerce Blvd, Springfield",
            "555-0147",
            "quotes@metroglass.example",
            4.9,
            &["Windshield replacement", "Window tinting", "Trim repair"],
            &["AGSC Certified"],
            weekday_hours("8:00 AM - 5:00 PM", "9:00 AM - 1:00 PM", "Closed"),
        ),
        shop(
            "shop-004",
            "Hilltop Paint & Finish",
            "77 Summit Ave, Springfield",
            "555-0162",
            "hello@hilltoppaint.example",
            4.4,
            &["Full resprays", "Paint correction", "Scratch repair"],
            &["PPG Certified Refinisher"],
            weekday_hours("9:00 AM - 6:00 PM", "10:00 AM - 3:00 PM", "Closed"),
        ),
        shop(
            "shop-005",
            "Ironclad Frame Works",
            "9 Foundry St, Springfield",
            "555-0178",
            "jobs@ironcladframe.example",
            4.7,
            &["Structural repair", "Frame straightening", "Welding"],
            &["I-CAR Gold Class", "Chief Certified"],
            weekday_hours("7:00 AM - 4:00 PM", "Closed", "Closed"),
        ),
        shop(
            "shop-006",
            "Luxline Motors Service",
            "500 Grand Pkwy, Springfield",
            "555-0191",
            "concierge@luxline.example",
            4.5,
            &["Luxury vehicles", "Aluminum body repair", "Paintless dent removal"],
            &["OEM Certified (BMW, Mercedes-Benz)", "ASE Master"],
            weekday_hours("8:00 AM - 7:00 PM", "9:00 AM - 4:00 PM", "11:00 AM - 3:00 PM"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id() {
        let found = repair_shop("shop-003").unwrap();
        assert_eq!(found.name, "Metro Glass & Trim");
        assert!(repair_shop("shop-999").is_none());
    }

    #[test]
    fn every_shop_has_full_week_of_hours() {
        for shop in repair_shops() {
            assert_eq!(shop.hours.len(), 7, "shop {} missing hours", shop.id);
            assert!((0.0..=5.0).contains(&shop.rating));
        }
    }
}
