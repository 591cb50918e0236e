use sqlx::FromRow;

/// Cached geocoding result for a (name, state) pair.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct City {
    pub id: i32,
    pub name: String,
    pub state: String,
    pub lat: f64,
    pub lng: f64,
}

impl City {
    /// `name,state`, the address form the routing provider expects.
    pub fn city_state(&self) -> String {
        format!("{},{}", self.name, self.state)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCity {
    pub name: String,
    pub state: String,
    pub lat: f64,
    pub lng: f64,
}
