use crate::home::{Contact, Home, Review};

/// The demonstration listings used to seed an empty collection.
pub fn demo_homes() -> Vec<Home> {
    vec![
        Home {
            id: "1".to_owned(),
            name: "Sunshine Children's Home".to_owned(),
            location: "Nairobi, Kenya".to_owned(),
            description: "A loving home providing care, education, and support to vulnerable children in Nairobi.".to_owned(),
            image: "https://images.unsplash.com/photo-1559027615-cd4628902d4a?w=500".to_owned(),
            children: 45,
            capacity: 60,
            urgent_needs: strings(&["School supplies", "Medical care", "Food"]),
            donations_received: 15420.0,
            donation_goal: 25000.0,
            visits: 127,
            rating: 4.8,
            reviews: vec![
                review("1", "Sarah M.", 5, "Amazing place with caring staff!", "2024-01-15"),
                review("2", "John D.", 4, "Great facilities and wonderful children.", "2024-01-10"),
            ],
            contact: Contact {
                phone: "+254 700 123 456".to_owned(),
                email: "info@sunshinehome.org".to_owned(),
                address: "123 Hope Street, Nairobi".to_owned(),
            },
            available_visit_dates: strings(&["2024-02-15", "2024-02-22", "2024-03-01", "2024-03-08"]),
        },
        Home {
            id: "2".to_owned(),
            name: "Hope Haven Orphanage".to_owned(),
            location: "Mombasa, Kenya".to_owned(),
            description: "Dedicated to providing a safe haven and bright future for orphaned children.".to_owned(),
            image: "https://images.unsplash.com/photo-1488521787991-ed7bbaae773c?w=500".to_owned(),
            children: 32,
            capacity: 40,
            urgent_needs: strings(&["Clothing", "Educational materials", "Healthcare"]),
            donations_received: 8750.0,
            donation_goal: 18000.0,
            visits: 89,
            rating: 4.6,
            reviews: vec![
                review("3", "Mary K.", 5, "Incredible work being done here!", "2024-01-12"),
                review("4", "Peter L.", 4, "Very well organized and clean.", "2024-01-08"),
            ],
            contact: Contact {
                phone: "+254 700 789 012".to_owned(),
                email: "contact@hopehaven.org".to_owned(),
                address: "456 Care Avenue, Mombasa".to_owned(),
            },
            available_visit_dates: strings(&["2024-02-18", "2024-02-25", "2024-03-04", "2024-03-11"]),
        },
        Home {
            id: "3".to_owned(),
            name: "Little Angels Home".to_owned(),
            location: "Kisumu, Kenya".to_owned(),
            description: "Nurturing young hearts and minds with love, education, and opportunities.".to_owned(),
            image: "https://images.unsplash.com/photo-1544027993-37dbfe43562a?w=500".to_owned(),
            children: 28,
            capacity: 35,
            urgent_needs: strings(&["Books", "Toys", "Nutritious food"]),
            donations_received: 12300.0,
            donation_goal: 20000.0,
            visits: 156,
            rating: 4.9,
            reviews: vec![
                review("5", "Grace W.", 5, "The children are so happy and well-cared for!", "2024-01-14"),
                review("6", "David M.", 5, "Outstanding facilities and programs.", "2024-01-09"),
            ],
            contact: Contact {
                phone: "+254 700 345 678".to_owned(),
                email: "info@littleangels.org".to_owned(),
                address: "789 Angel Street, Kisumu".to_owned(),
            },
            available_visit_dates: strings(&["2024-02-20", "2024-02-27", "2024-03-06", "2024-03-13"]),
        },
    ]
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

fn review(id: &str, user: &str, rating: u8, comment: &str, date: &str) -> Review {
    Review {
        id: id.to_owned(),
        user: user.to_owned(),
        rating,
        comment: comment.to_owned(),
        date: date.to_owned(),
    }
}
