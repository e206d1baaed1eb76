//! Destination Catalog
//!
//! Curated destinations with solo female safety ratings, hidden-gem flags and a
//! handful of seed activities per destination. The catalog backs the
//! destination listing endpoints, continent validation for itinerary requests
//! and the curated activity source.
//!
//! Safety ratings:
//! - 5: extremely safe, top pick for solo female travelers
//! - 4: very safe with standard precautions
//! - 3: safe with extra awareness
//! - 2: research and preparation needed
//! - 1: not recommended for solo female travel

use std::collections::{BTreeMap, BTreeSet};

use crate::models::activity::{Coordinates, RawActivity};
use crate::models::destination::{
    CitiesAndRegions, CityEntry, Destination, DestinationFilter, DestinationListing,
    SoloFemaleGuidelines,
};

pub const SOLO_FEMALE_SAFE_RATING: u8 = 4;

pub const INTERESTS: [&str; 13] = [
    "scenic drives",
    "hikes",
    "beaches",
    "theme parks",
    "museums",
    "historic landmarks",
    "family friendly",
    "dining hot spots",
    "outdoor",
    "solo female",
    "cultural experiences",
    "nightlife",
    "shopping",
];

struct SeedActivity {
    name: &'static str,
    category: &'static str,
    description: &'static str,
    address: &'static str,
    lat: f64,
    lng: f64,
    duration: &'static str,
    best_time: &'static str,
    solo_note: &'static str,
}

struct SeedDestination {
    key: &'static str,
    name: &'static str,
    country: &'static str,
    region: &'static str,
    continent: &'static str,
    safety: u8,
    safety_notes: &'static str,
    description: &'static str,
    hidden_gem: bool,
    lat: f64,
    lng: f64,
    cities: &'static [&'static str],
    activities: &'static [SeedActivity],
}

static DESTINATIONS: &[SeedDestination] = &[
    SeedDestination {
        key: "new_york",
        name: "New York City",
        country: "United States",
        region: "North America",
        continent: "North America",
        safety: 4,
        safety_notes: "Very safe in Manhattan and Brooklyn. Use ride-sharing at night, avoid empty subway cars.",
        description: "The city that never sleeps - museums, Broadway, and iconic landmarks",
        hidden_gem: false,
        lat: 40.7128,
        lng: -74.0060,
        cities: &["Manhattan", "Brooklyn"],
        activities: &[
            SeedActivity {
                name: "Metropolitan Museum of Art",
                category: "museums",
                description: "One of the world's largest and most prestigious art museums",
                address: "1000 5th Ave, New York, NY 10028",
                lat: 40.7794,
                lng: -73.9632,
                duration: "3-4 hours",
                best_time: "10:00 AM - 2:00 PM",
                solo_note: "Very safe, well-staffed, good for solo exploration",
            },
            SeedActivity {
                name: "Museum of Modern Art (MoMA)",
                category: "museums",
                description: "Premier collection of contemporary and modern art",
                address: "11 W 53rd St, New York, NY 10019",
                lat: 40.7614,
                lng: -73.9776,
                duration: "2-3 hours",
                best_time: "11:00 AM - 3:00 PM",
                solo_note: "Excellent for solo visits, frequent security presence",
            },
            SeedActivity {
                name: "Statue of Liberty",
                category: "historic landmarks",
                description: "Iconic symbol of freedom and democracy",
                address: "Liberty Island, New York, NY 10004",
                lat: 40.6892,
                lng: -74.0445,
                duration: "4-5 hours",
                best_time: "Morning ferry",
                solo_note: "Safe ferry ride and island visit, join group tours",
            },
            SeedActivity {
                name: "Central Park",
                category: "family friendly",
                description: "Large public park with playgrounds, lakes, and activities",
                address: "Central Park, New York, NY",
                lat: 40.7829,
                lng: -73.9654,
                duration: "3-4 hours",
                best_time: "Morning to afternoon",
                solo_note: "Very safe during day, stick to main paths, avoid after dark",
            },
            SeedActivity {
                name: "High Line Park",
                category: "solo female",
                description: "Elevated park perfect for solo walks with great city views",
                address: "High Line, New York, NY 10011",
                lat: 40.7480,
                lng: -74.0048,
                duration: "1-2 hours",
                best_time: "Morning or late afternoon",
                solo_note: "Excellent for solo female travelers - well-patrolled, lots of people",
            },
            SeedActivity {
                name: "Chelsea Market",
                category: "dining hot spots",
                description: "Indoor food hall with dozens of vendors under the High Line",
                address: "75 9th Ave, New York, NY 10011",
                lat: 40.7424,
                lng: -74.0061,
                duration: "1-2 hours",
                best_time: "Lunch",
                solo_note: "Busy and well-lit, easy to eat solo at the counters",
            },
        ],
    },
    SeedDestination {
        key: "toronto",
        name: "Toronto",
        country: "Canada",
        region: "North America",
        continent: "North America",
        safety: 5,
        safety_notes: "One of the safest major cities globally. Excellent public transport and helpful locals.",
        description: "Diverse, multicultural city with CN Tower and vibrant neighborhoods",
        hidden_gem: false,
        lat: 43.6532,
        lng: -79.3832,
        cities: &["Toronto"],
        activities: &[
            SeedActivity {
                name: "CN Tower",
                category: "historic landmarks",
                description: "Iconic telecommunications tower with observation decks",
                address: "290 Bremner Blvd, Toronto, ON M5V 3L9",
                lat: 43.6426,
                lng: -79.3871,
                duration: "2-3 hours",
                best_time: "Sunset for best views",
                solo_note: "Extremely safe, perfect for solo travelers",
            },
            SeedActivity {
                name: "Distillery District",
                category: "cultural experiences",
                description: "Historic cobblestone streets with art galleries and cafes",
                address: "55 Mill St, Toronto, ON M5A 3C4",
                lat: 43.6503,
                lng: -79.3594,
                duration: "2-4 hours",
                best_time: "Afternoon to evening",
                solo_note: "Very safe, pedestrian-only area, great for solo exploration",
            },
            SeedActivity {
                name: "Harbourfront Centre",
                category: "solo female",
                description: "Cultural center by the lake with events and waterfront walks",
                address: "235 Queens Quay W, Toronto, ON M5J 2G8",
                lat: 43.6385,
                lng: -79.3837,
                duration: "2-3 hours",
                best_time: "Day or evening",
                solo_note: "Extremely safe, well-lit waterfront, regular security patrols",
            },
        ],
    },
    SeedDestination {
        key: "peggys_cove",
        name: "Peggy's Cove",
        country: "Canada",
        region: "North America",
        continent: "North America",
        safety: 5,
        safety_notes: "Extremely safe small community. Locals are very helpful to solo travelers.",
        description: "Picturesque fishing village with iconic lighthouse and rugged coastline",
        hidden_gem: true,
        lat: 44.4925,
        lng: -63.9168,
        cities: &[],
        activities: &[
            SeedActivity {
                name: "Peggy's Cove Lighthouse",
                category: "scenic drives",
                description: "Canada's most photographed lighthouse on granite rocks",
                address: "178 Peggys Point Rd, Peggys Cove, NS B3Z 3S1",
                lat: 44.4925,
                lng: -63.9168,
                duration: "1-2 hours",
                best_time: "Golden hour for photography",
                solo_note: "Very safe, small community, easy parking and walking",
            },
            SeedActivity {
                name: "Coastal Walking Trail",
                category: "solo female",
                description: "Safe coastal trail with stunning ocean views",
                address: "Peggy's Cove, NS",
                lat: 44.4930,
                lng: -63.9150,
                duration: "30-60 minutes",
                best_time: "Morning or afternoon",
                solo_note: "Very safe trail, well-marked, other walkers usually present",
            },
        ],
    },
    SeedDestination {
        key: "mexico_city",
        name: "Mexico City",
        country: "Mexico",
        region: "North America",
        continent: "North America",
        safety: 3,
        safety_notes: "Generally safe in tourist areas like Roma Norte and Condesa. Avoid displaying valuables, use Uber.",
        description: "Vibrant capital with incredible food, museums, and historic architecture",
        hidden_gem: false,
        lat: 19.4326,
        lng: -99.1332,
        cities: &["Coyoacán", "Roma Norte"],
        activities: &[
            SeedActivity {
                name: "Frida Kahlo Museum",
                category: "museums",
                description: "The Blue House where Frida Kahlo lived and worked",
                address: "Londres 247, Del Carmen, Coyoacán, 04100 Ciudad de México, CDMX",
                lat: 19.3550,
                lng: -99.1624,
                duration: "2-3 hours",
                best_time: "Morning to avoid crowds",
                solo_note: "Safe area (Coyoacán), book tickets online, join guided tours",
            },
            SeedActivity {
                name: "Roma Norte Neighborhood",
                category: "cultural experiences",
                description: "Hip neighborhood with galleries, cafes, and boutiques",
                address: "Roma Norte, Mexico City, CDMX",
                lat: 19.4160,
                lng: -99.1677,
                duration: "3-4 hours",
                best_time: "Afternoon to evening",
                solo_note: "Very safe neighborhood for solo female travelers, walkable and well-policed",
            },
            SeedActivity {
                name: "Condesa Park Area",
                category: "solo female",
                description: "Safe, upscale area perfect for solo female travelers",
                address: "Condesa, Mexico City, CDMX",
                lat: 19.4095,
                lng: -99.1720,
                duration: "2-3 hours",
                best_time: "Day to evening",
                solo_note: "Excellent for solo women - safe, trendy, good restaurants and cafes",
            },
        ],
    },
    SeedDestination {
        key: "london",
        name: "London",
        country: "United Kingdom",
        region: "Europe",
        continent: "Europe",
        safety: 4,
        safety_notes: "Generally very safe. Be aware of pickpockets in tourist areas. Public transport excellent.",
        description: "Historic capital with world-class museums, royal palaces, and diverse culture",
        hidden_gem: false,
        lat: 51.5074,
        lng: -0.1278,
        cities: &["Westminster", "Camden"],
        activities: &[
            SeedActivity {
                name: "British Museum",
                category: "museums",
                description: "World's largest collection of historical artifacts and art",
                address: "Great Russell St, London WC1B 3DG, UK",
                lat: 51.5194,
                lng: -0.1270,
                duration: "4-6 hours",
                best_time: "Early morning to avoid crowds",
                solo_note: "Very safe, excellent for solo exploration",
            },
            SeedActivity {
                name: "Tate Modern",
                category: "museums",
                description: "Premier modern and contemporary art gallery",
                address: "Bankside, London SE1 9TG, UK",
                lat: 51.5076,
                lng: -0.0994,
                duration: "3-4 hours",
                best_time: "Afternoon",
                solo_note: "Safe, well-staffed, great for solo art lovers",
            },
            SeedActivity {
                name: "Tower of London",
                category: "historic landmarks",
                description: "Historic castle and home to the Crown Jewels",
                address: "St Katharine's & Wapping, London EC3N 4AB, UK",
                lat: 51.5081,
                lng: -0.0759,
                duration: "3-4 hours",
                best_time: "Early morning",
                solo_note: "Very safe, guided tours available",
            },
            SeedActivity {
                name: "Westminster Abbey",
                category: "historic landmarks",
                description: "Gothic abbey church where monarchs are crowned",
                address: "20 Deans Yd, Westminster, London SW1P 3PA, UK",
                lat: 51.4994,
                lng: -0.1273,
                duration: "2-3 hours",
                best_time: "Morning",
                solo_note: "Safe, audio guides available for solo visitors",
            },
            SeedActivity {
                name: "Borough Market",
                category: "dining hot spots",
                description: "London's oldest food market with street food and produce stalls",
                address: "8 Southwark St, London SE1 1TL, UK",
                lat: 51.5055,
                lng: -0.0910,
                duration: "1-2 hours",
                best_time: "Lunch",
                solo_note: "Crowded but safe, keep bags zipped",
            },
            SeedActivity {
                name: "Covent Garden",
                category: "solo female",
                description: "Vibrant market area perfect for solo exploration",
                address: "Covent Garden, London WC2E, UK",
                lat: 51.5118,
                lng: -0.1226,
                duration: "2-3 hours",
                best_time: "Afternoon",
                solo_note: "Excellent for solo female travelers - safe, lively, great shopping and cafes",
            },
        ],
    },
    SeedDestination {
        key: "paris",
        name: "Paris",
        country: "France",
        region: "Europe",
        continent: "Europe",
        safety: 4,
        safety_notes: "Generally very safe. Be aware of pickpockets in tourist areas. Metro safe during day.",
        description: "City of Light with world-class museums, cuisine, and romantic atmosphere",
        hidden_gem: false,
        lat: 48.8566,
        lng: 2.3522,
        cities: &["Montmartre", "Le Marais"],
        activities: &[
            SeedActivity {
                name: "Louvre Museum",
                category: "museums",
                description: "World's largest art museum housing the Mona Lisa",
                address: "Rue de Rivoli, 75001 Paris, France",
                lat: 48.8606,
                lng: 2.3376,
                duration: "4-6 hours",
                best_time: "Early morning or late afternoon",
                solo_note: "Very safe, excellent for solo visits, book timed entry",
            },
            SeedActivity {
                name: "Musée d'Orsay",
                category: "museums",
                description: "Impressionist masterpieces in a former railway station",
                address: "1 Rue de la Légion d'Honneur, 75007 Paris, France",
                lat: 48.8600,
                lng: 2.3266,
                duration: "2-3 hours",
                best_time: "Morning",
                solo_note: "Very safe, quieter on Thursday evenings",
            },
            SeedActivity {
                name: "Centre Pompidou",
                category: "museums",
                description: "Modern art museum with a rooftop view over the city",
                address: "Place Georges-Pompidou, 75004 Paris, France",
                lat: 48.8607,
                lng: 2.3522,
                duration: "2-3 hours",
                best_time: "Afternoon",
                solo_note: "Safe and busy, watch for pickpockets on the piazza",
            },
            SeedActivity {
                name: "Eiffel Tower",
                category: "historic landmarks",
                description: "Iconic iron lattice tower and symbol of Paris",
                address: "Champ de Mars, 5 Avenue Anatole France, 75007 Paris",
                lat: 48.8584,
                lng: 2.2945,
                duration: "2-3 hours",
                best_time: "Sunset for best photos",
                solo_note: "Very safe area, well-patrolled, great for solo photos",
            },
            SeedActivity {
                name: "Rue Montorgueil Food Street",
                category: "dining hot spots",
                description: "Pedestrian street of bakeries, cheese shops and bistros",
                address: "Rue Montorgueil, 75002 Paris, France",
                lat: 48.8647,
                lng: 2.3470,
                duration: "1-2 hours",
                best_time: "Lunch",
                solo_note: "Lively and safe, counter seating is easy for solo diners",
            },
            SeedActivity {
                name: "Le Comptoir du Relais",
                category: "dining hot spots",
                description: "Classic Saint-Germain bistro known for its seasonal menu",
                address: "9 Carrefour de l'Odéon, 75006 Paris, France",
                lat: 48.8520,
                lng: 2.3389,
                duration: "1.5 hours",
                best_time: "Dinner",
                solo_note: "Book ahead, well-lit neighborhood at night",
            },
            SeedActivity {
                name: "Marais District",
                category: "solo female",
                description: "Historic district perfect for solo exploration with cafes and boutiques",
                address: "Le Marais, Paris, France",
                lat: 48.8566,
                lng: 2.3622,
                duration: "3-4 hours",
                best_time: "Afternoon",
                solo_note: "Excellent for solo female travelers - safe, walkable, lots to see",
            },
        ],
    },
    SeedDestination {
        key: "cesky_krumlov",
        name: "Český Krumlov",
        country: "Czech Republic",
        region: "Europe",
        continent: "Europe",
        safety: 5,
        safety_notes: "Extremely safe small town. One of the safest places in Europe for solo female travel.",
        description: "Fairytale medieval town with castle and winding cobblestone streets",
        hidden_gem: true,
        lat: 48.8127,
        lng: 14.3175,
        cities: &[],
        activities: &[
            SeedActivity {
                name: "Český Krumlov Castle",
                category: "historic landmarks",
                description: "13th-century castle complex overlooking the Vltava River",
                address: "Zámek 59, 381 01 Český Krumlov, Czechia",
                lat: 48.8127,
                lng: 14.3175,
                duration: "3-4 hours",
                best_time: "Morning for fewer crowds",
                solo_note: "Extremely safe, perfect for solo exploration, English tours available",
            },
            SeedActivity {
                name: "Old Town Walking Tour",
                category: "scenic drives",
                description: "Medieval streets perfect for leisurely strolling",
                address: "Historic Center, Český Krumlov, Czechia",
                lat: 48.8101,
                lng: 14.3153,
                duration: "2-3 hours",
                best_time: "Anytime",
                solo_note: "Extremely safe for solo walking, very friendly locals",
            },
            SeedActivity {
                name: "Vltava River Views",
                category: "solo female",
                description: "Peaceful riverside walks perfect for solo reflection",
                address: "Český Krumlov, Czechia",
                lat: 48.8105,
                lng: 14.3140,
                duration: "1-2 hours",
                best_time: "Early morning or late afternoon",
                solo_note: "Extremely peaceful and safe, perfect for solo female travelers",
            },
        ],
    },
    SeedDestination {
        key: "sintra",
        name: "Sintra",
        country: "Portugal",
        region: "Europe",
        continent: "Europe",
        safety: 5,
        safety_notes: "Extremely safe small town. Perfect for solo female travelers.",
        description: "Fairytale town with colorful palaces and romantic gardens",
        hidden_gem: true,
        lat: 38.8029,
        lng: -9.3817,
        cities: &[],
        activities: &[SeedActivity {
            name: "Pena Palace",
            category: "historic landmarks",
            description: "Romanticist palace painted in bright yellows and reds",
            address: "Estrada da Pena, 2710-609 Sintra, Portugal",
            lat: 38.7876,
            lng: -9.3906,
            duration: "2-3 hours",
            best_time: "Opening time",
            solo_note: "Very safe, take the shuttle bus up the hill",
        }],
    },
    SeedDestination {
        key: "hallstatt",
        name: "Hallstatt",
        country: "Austria",
        region: "Europe",
        continent: "Europe",
        safety: 5,
        safety_notes: "One of the safest places in Europe. Tiny village, very welcoming.",
        description: "Picture-perfect lakeside village in the Austrian Alps",
        hidden_gem: true,
        lat: 47.5622,
        lng: 13.6493,
        cities: &[],
        activities: &[SeedActivity {
            name: "Hallstatt Skywalk",
            category: "hikes",
            description: "Viewing platform above the lake reached by funicular or trail",
            address: "Salzbergstraße 21, 4830 Hallstatt, Austria",
            lat: 47.5616,
            lng: 13.6412,
            duration: "2 hours",
            best_time: "Morning",
            solo_note: "Well-marked trail, popular with other walkers",
        }],
    },
    SeedDestination {
        key: "rothenburg",
        name: "Rothenburg ob der Tauber",
        country: "Germany",
        region: "Europe",
        continent: "Europe",
        safety: 5,
        safety_notes: "Extremely safe medieval town. Perfect for solo exploration.",
        description: "Best-preserved medieval town in Germany",
        hidden_gem: true,
        lat: 49.3772,
        lng: 10.1787,
        cities: &[],
        activities: &[SeedActivity {
            name: "Night Watchman Tour",
            category: "historic landmarks",
            description: "Evening walking tour through the walled old town",
            address: "Marktplatz, 91541 Rothenburg ob der Tauber, Germany",
            lat: 49.3769,
            lng: 10.1792,
            duration: "1 hour",
            best_time: "8:00 PM",
            solo_note: "Group tour in a very safe town",
        }],
    },
    SeedDestination {
        key: "tokyo",
        name: "Tokyo",
        country: "Japan",
        region: "Asia",
        continent: "Asia",
        safety: 5,
        safety_notes: "One of the safest major cities globally. Extremely low crime rate, helpful police.",
        description: "Blend of ultra-modern and traditional culture, incredible food scene",
        hidden_gem: false,
        lat: 35.6762,
        lng: 139.6503,
        cities: &["Shibuya", "Asakusa"],
        activities: &[
            SeedActivity {
                name: "Senso-ji Temple",
                category: "cultural experiences",
                description: "Tokyo's oldest temple in historic Asakusa district",
                address: "2-3-1 Asakusa, Taito City, Tokyo 111-0032, Japan",
                lat: 35.7148,
                lng: 139.7967,
                duration: "2-3 hours",
                best_time: "Early morning for fewer crowds",
                solo_note: "Extremely safe, perfect for solo cultural exploration",
            },
            SeedActivity {
                name: "Ueno Park",
                category: "family friendly",
                description: "Large park with museums, zoo, and cherry blossoms",
                address: "Uenokoen, Taito City, Tokyo 110-0007, Japan",
                lat: 35.7144,
                lng: 139.7744,
                duration: "3-4 hours",
                best_time: "Morning to afternoon",
                solo_note: "Extremely safe, great for solo park walks and museum visits",
            },
            SeedActivity {
                name: "Tsukiji Outer Market",
                category: "dining hot spots",
                description: "Street food stalls and sushi counters around the old fish market",
                address: "4 Chome-16-2 Tsukiji, Chuo City, Tokyo 104-0045, Japan",
                lat: 35.6655,
                lng: 139.7707,
                duration: "2 hours",
                best_time: "Breakfast",
                solo_note: "Very safe, solo dining is common",
            },
            SeedActivity {
                name: "Shibuya Crossing",
                category: "solo female",
                description: "World's busiest pedestrian crossing, iconic Tokyo experience",
                address: "Shibuya City, Tokyo, Japan",
                lat: 35.6598,
                lng: 139.7006,
                duration: "1-2 hours",
                best_time: "Evening for the full experience",
                solo_note: "Extremely safe even with crowds, perfect solo experience",
            },
        ],
    },
    SeedDestination {
        key: "luang_prabang",
        name: "Luang Prabang",
        country: "Laos",
        region: "Asia",
        continent: "Asia",
        safety: 4,
        safety_notes: "Generally safe for solo female travelers. Conservative dress recommended. Avoid walking alone very late.",
        description: "UNESCO World Heritage town with Buddhist temples and French colonial architecture",
        hidden_gem: true,
        lat: 19.8856,
        lng: 102.1347,
        cities: &[],
        activities: &[
            SeedActivity {
                name: "Alms Ceremony",
                category: "cultural experiences",
                description: "Traditional Buddhist morning alms giving ceremony",
                address: "Sisavangvong Road, Luang Prabang, Laos",
                lat: 19.8845,
                lng: 102.1348,
                duration: "1 hour",
                best_time: "6:00 AM",
                solo_note: "Safe cultural experience, maintain respectful distance, dress modestly",
            },
            SeedActivity {
                name: "Kuang Si Falls",
                category: "scenic drives",
                description: "Multi-tiered waterfall with turquoise pools",
                address: "Kuang Si Falls, Luang Prabang, Laos",
                lat: 19.7489,
                lng: 102.0714,
                duration: "4-5 hours including travel",
                best_time: "Morning for best lighting",
                solo_note: "Safe with tour groups, swimming allowed in designated areas",
            },
            SeedActivity {
                name: "Night Market",
                category: "solo female",
                description: "Evening handicraft market perfect for solo browsing",
                address: "Sisavangvong Road, Luang Prabang, Laos",
                lat: 19.8854,
                lng: 102.1351,
                duration: "2-3 hours",
                best_time: "Evening after 6 PM",
                solo_note: "Safe for solo female shopping, well-lit, friendly vendors",
            },
        ],
    },
    SeedDestination {
        key: "buenos_aires",
        name: "Buenos Aires",
        country: "Argentina",
        region: "South America",
        continent: "South America",
        safety: 3,
        safety_notes: "Generally safe in tourist areas like Palermo and Recoleta. Use official taxis, avoid showing valuables.",
        description: "Paris of South America with tango, steak, and European architecture",
        hidden_gem: false,
        lat: -34.6037,
        lng: -58.3816,
        cities: &["Palermo", "Recoleta"],
        activities: &[
            SeedActivity {
                name: "San Telmo Sunday Market",
                category: "cultural experiences",
                description: "Historic neighborhood market with tango performances",
                address: "Defensa 1179, C1065 CABA, Argentina",
                lat: -34.6211,
                lng: -58.3731,
                duration: "3-4 hours",
                best_time: "Sunday afternoon",
                solo_note: "Safe during market hours, stay in main tourist areas",
            },
            SeedActivity {
                name: "Recoleta Cemetery",
                category: "historic landmarks",
                description: "Famous cemetery where Eva Perón is buried",
                address: "Junín 1760, C1113 CABA, Argentina",
                lat: -34.5877,
                lng: -58.3923,
                duration: "1-2 hours",
                best_time: "Morning or afternoon",
                solo_note: "Very safe area (Recoleta), well-maintained, security present",
            },
            SeedActivity {
                name: "Palermo Neighborhood",
                category: "solo female",
                description: "Trendy neighborhood perfect for solo exploration",
                address: "Palermo, Buenos Aires, Argentina",
                lat: -34.5875,
                lng: -58.4270,
                duration: "4-6 hours",
                best_time: "Afternoon to evening",
                solo_note: "Very safe for solo female travelers, upscale area with good restaurants",
            },
        ],
    },
    SeedDestination {
        key: "melbourne",
        name: "Melbourne",
        country: "Australia",
        region: "Australia/Oceania",
        continent: "Oceania",
        safety: 5,
        safety_notes: "Extremely safe city. Excellent public transport. Very solo-female-friendly culture.",
        description: "Cultural capital with coffee culture, street art, and diverse food scene",
        hidden_gem: false,
        lat: -37.8136,
        lng: 144.9631,
        cities: &["Fitzroy", "St Kilda"],
        activities: &[
            SeedActivity {
                name: "Hosier Lane Street Art",
                category: "cultural experiences",
                description: "Famous laneway covered in ever-changing street art",
                address: "Hosier Ln, Melbourne VIC 3000, Australia",
                lat: -37.8162,
                lng: 144.9692,
                duration: "1-2 hours",
                best_time: "Anytime",
                solo_note: "Very safe, central location, perfect for solo photography",
            },
            SeedActivity {
                name: "Royal Botanic Gardens",
                category: "family friendly",
                description: "Beautiful gardens along the Yarra River",
                address: "Birdwood Ave, Melbourne VIC 3004, Australia",
                lat: -37.8304,
                lng: 144.9796,
                duration: "2-3 hours",
                best_time: "Morning to afternoon",
                solo_note: "Extremely safe, perfect for solo walks and picnics",
            },
            SeedActivity {
                name: "Federation Square",
                category: "solo female",
                description: "Cultural hub perfect for solo travelers to people-watch",
                address: "Flinders St & Swanston St, Melbourne VIC 3000, Australia",
                lat: -37.8179,
                lng: 144.9690,
                duration: "2-3 hours",
                best_time: "Afternoon to evening",
                solo_note: "Extremely safe, central meeting point, lots of activities",
            },
        ],
    },
];

impl SeedDestination {
    fn to_destination(&self) -> Destination {
        Destination {
            key: self.key.to_string(),
            name: self.name.to_string(),
            country: self.country.to_string(),
            region: self.region.to_string(),
            continent: self.continent.to_string(),
            description: self.description.to_string(),
            safety_rating: self.safety,
            safety_notes: self.safety_notes.to_string(),
            hidden_gem: self.hidden_gem,
            image: format!("/images/destinations/{}.jpg", self.key),
            coordinates: Coordinates {
                lat: self.lat,
                lng: self.lng,
            },
            popular_cities: self.cities.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn matches(&self, query: &str) -> bool {
        let name = self.name.to_lowercase();
        let key = self.key.replace('_', " ");
        let label = format!("{}, {}", name, self.country.to_lowercase());
        query == key || query == name || query == label || query == self.key
    }
}

fn normalize_query(query: &str) -> String {
    query
        .trim()
        .to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn seed_for(query: &str) -> Option<&'static SeedDestination> {
    let q = normalize_query(query);
    if q.is_empty() {
        return None;
    }
    let head = q.split(',').next().unwrap_or(&q).trim().to_string();
    let head_no_city = head.trim_end_matches(" city").to_string();

    DESTINATIONS
        .iter()
        .find(|d| d.matches(&q))
        .or_else(|| DESTINATIONS.iter().find(|d| d.matches(&head)))
        .or_else(|| DESTINATIONS.iter().find(|d| d.matches(&head_no_city)))
}

/// Every destination in catalog order.
pub fn all_destinations() -> Vec<Destination> {
    DESTINATIONS.iter().map(SeedDestination::to_destination).collect()
}

/// Resolve "Paris", "paris", "Paris, France" or "new york" to a catalog entry.
pub fn find_destination(query: &str) -> Option<Destination> {
    seed_for(query).map(SeedDestination::to_destination)
}

pub fn seed_activities(destination: &str) -> Vec<RawActivity> {
    let Some(seed) = seed_for(destination) else {
        return Vec::new();
    };

    seed.activities
        .iter()
        .map(|a| RawActivity {
            name: Some(a.name.to_string()),
            category: Some(a.category.to_string()),
            description: Some(a.description.to_string()),
            address: Some(a.address.to_string()),
            location: Some(Coordinates { lat: a.lat, lng: a.lng }),
            estimated_duration: Some(a.duration.to_string()),
            best_time: Some(a.best_time.to_string()),
            solo_female_notes: Some(a.solo_note.to_string()).filter(|n| !n.is_empty()),
            source: Some("catalog".to_string()),
            source_url: None,
        })
        .collect()
}

pub fn filter_destinations(filter: &DestinationFilter) -> DestinationListing {
    let lowered = |s: &Option<String>| {
        s.as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_lowercase)
    };
    let region = lowered(&filter.region);
    let continent = lowered(&filter.continent);
    let city = lowered(&filter.city);
    let mut min_rating = filter.min_safety_rating.unwrap_or(0);
    if filter.solo_female_safe.unwrap_or(false) {
        min_rating = min_rating.max(SOLO_FEMALE_SAFE_RATING);
    }

    let destinations: BTreeMap<String, Destination> = all_destinations()
        .into_iter()
        .filter(|d| {
            region.as_ref().map_or(true, |r| {
                d.region.to_lowercase() == *r || d.continent.to_lowercase() == *r
            })
        })
        .filter(|d| continent.as_ref().map_or(true, |c| d.continent.to_lowercase() == *c))
        .filter(|d| {
            city.as_ref().map_or(true, |c| {
                d.name.to_lowercase().contains(c.as_str())
                    || d.key.replace('_', " ").contains(c.as_str())
                    || d.popular_cities.iter().any(|p| p.to_lowercase().contains(c.as_str()))
            })
        })
        .filter(|d| d.safety_rating >= min_rating)
        .filter(|d| !filter.hidden_gems.unwrap_or(false) || d.hidden_gem)
        .map(|d| (d.key.clone(), d))
        .collect();

    DestinationListing {
        total: destinations.len(),
        destinations,
        regions: regions(),
    }
}

pub fn regions() -> Vec<String> {
    DESTINATIONS
        .iter()
        .map(|d| d.region.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn interests() -> Vec<String> {
    INTERESTS.iter().map(|i| i.to_string()).collect()
}

pub fn solo_female_guidelines() -> SoloFemaleGuidelines {
    let owned = |tips: &[&str]| tips.iter().map(|t| t.to_string()).collect();
    SoloFemaleGuidelines {
        general_tips: owned(&[
            "Research accommodation in safe, well-reviewed areas",
            "Share your itinerary with someone at home",
            "Trust your instincts - if something feels wrong, leave",
            "Dress appropriately for local culture and customs",
            "Keep emergency contacts and embassy information handy",
            "Use official transportation options when possible",
            "Stay confident and aware of your surroundings",
        ]),
        accommodation_tips: owned(&[
            "Choose well-reviewed accommodations in safe neighborhoods",
            "Consider female-only hostels or guesthouses",
            "Book accommodations near public transportation",
            "Read recent reviews from other solo female travelers",
        ]),
        transportation_tips: owned(&[
            "Use official ride-sharing apps or registered taxis",
            "Sit near the driver on public transport if possible",
            "Avoid walking alone late at night in unfamiliar areas",
            "Keep transportation apps downloaded and ready to use",
        ]),
    }
}

pub fn cities_and_regions() -> CitiesAndRegions {
    let mut regions: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut cities = Vec::new();

    for seed in DESTINATIONS {
        regions
            .entry(seed.region.to_string())
            .or_default()
            .push(seed.name.to_string());
        cities.push(CityEntry {
            city: seed.name.to_string(),
            destination: seed.key.to_string(),
            country: seed.country.to_string(),
            region: seed.region.to_string(),
            safety_rating: seed.safety,
        });
        for city in seed.cities {
            cities.push(CityEntry {
                city: city.to_string(),
                destination: seed.key.to_string(),
                country: seed.country.to_string(),
                region: seed.region.to_string(),
                safety_rating: seed.safety,
            });
        }
    }

    CitiesAndRegions { regions, cities }
}

/// Continent for a theme park's country as reported by the wait-time
/// providers.
pub fn continent_for_country(country: &str) -> Option<&'static str> {
    let country = country.trim().to_lowercase();
    let continent = match country.as_str() {
        "united states" | "usa" | "us" | "canada" | "mexico" => "North America",
        "brazil" | "argentina" | "chile" | "colombia" | "peru" => "South America",
        "germany" | "netherlands" | "france" | "united kingdom" | "uk" | "england" | "spain"
        | "italy" | "belgium" | "denmark" | "sweden" | "norway" | "finland" | "austria"
        | "switzerland" | "poland" | "portugal" | "czech republic" | "ireland" => "Europe",
        "japan" | "china" | "south korea" | "hong kong" | "singapore" | "thailand"
        | "malaysia" | "taiwan" | "united arab emirates" | "india" => "Asia",
        "australia" | "new zealand" => "Oceania",
        "south africa" | "egypt" | "morocco" => "Africa",
        _ => return None,
    };
    Some(continent)
}
