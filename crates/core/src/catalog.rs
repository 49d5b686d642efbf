//! Static catalogs served by the utility endpoints.
//!
//! These lists drive the search filters and the registration form. Cities
//! and languages are served alphabetically; law types keep their curated
//! order.

/// Major Indian cities available as filter values.
pub const CITIES: &[&str] = &[
    "Mumbai",
    "Delhi",
    "Bangalore",
    "Hyderabad",
    "Ahmedabad",
    "Chennai",
    "Kolkata",
    "Pune",
    "Jaipur",
    "Surat",
    "Lucknow",
    "Kanpur",
    "Nagpur",
    "Indore",
    "Thane",
    "Bhopal",
    "Visakhapatnam",
    "Pimpri-Chinchwad",
    "Patna",
    "Vadodara",
    "Ghaziabad",
    "Ludhiana",
    "Agra",
    "Nashik",
    "Faridabad",
    "Meerut",
    "Rajkot",
    "Kalyan-Dombivali",
    "Vasai-Virar",
    "Varanasi",
    "Srinagar",
    "Aurangabad",
    "Dhanbad",
    "Amritsar",
    "Navi Mumbai",
    "Allahabad",
    "Ranchi",
    "Howrah",
    "Coimbatore",
    "Jabalpur",
    "Gwalior",
    "Vijayawada",
    "Jodhpur",
    "Madurai",
    "Raipur",
    "Kota",
];

/// Practice areas, in presentation order.
pub const LAW_TYPES: &[&str] = &[
    "Family Law",
    "Criminal Law",
    "Civil Law",
    "Corporate Law",
    "Property Law",
    "Labour Law",
    "Tax Law",
    "Intellectual Property Law",
    "Consumer Protection Law",
    "Banking & Finance Law",
    "Immigration Law",
    "Environmental Law",
    "Constitutional Law",
    "Cyber Law",
    "International Law",
];

/// Consultation languages available as filter values.
pub const LANGUAGES: &[&str] = &[
    "Hindi",
    "English",
    "Tamil",
    "Telugu",
    "Marathi",
    "Bengali",
    "Gujarati",
    "Kannada",
    "Malayalam",
    "Punjabi",
    "Urdu",
    "Odia",
    "Assamese",
];

/// Cities sorted alphabetically, as the API serves them.
pub fn cities_sorted() -> Vec<&'static str> {
    let mut cities = CITIES.to_vec();
    cities.sort_unstable();
    cities
}

/// Languages sorted alphabetically, as the API serves them.
pub fn languages_sorted() -> Vec<&'static str> {
    let mut languages = LANGUAGES.to_vec();
    languages.sort_unstable();
    languages
}
