use diesel::mysql::MysqlConnection;
use serde::Deserialize;
use serde_json::Value;

use restaurant_pizzas::config::Config;
use restaurant_pizzas::models::{NewPizza, NewRestaurant, NewRestaurantPizza};
use restaurant_pizzas::serializer::{to_document, FieldFilter, RESTAURANT_PIZZAS};
use restaurant_pizzas::{query, Error};

const SEED: &str = include_str!("seed.json");

#[derive(Debug, Deserialize)]
struct Seed {
    restaurants: Vec<NewRestaurant>,
    pizzas: Vec<NewPizza>,
    offers: Vec<SeedOffer>,
}

//indexes into Seed::restaurants and Seed::pizzas
#[derive(Debug, Deserialize)]
struct SeedOffer {
    restaurant: usize,
    pizza: usize,
    price: i32,
}

fn load_seed() -> Result<Seed, Error> {
    serde_json::from_str(SEED).map_err(|e| Error::Config(format!("bad seed data: {}", e)))
}

fn seed(conn: &MysqlConnection) -> Result<(), Error> {
    let data = load_seed()?;

    let mut restaurants = Vec::new();
    for new in &data.restaurants {
        restaurants.push(query::create_restaurant(new, conn)?);
    }

    let mut pizzas = Vec::new();
    for new in &data.pizzas {
        pizzas.push(query::create_pizza(new, conn)?);
    }

    for offer in &data.offers {
        let (restaurant, pizza) = match (restaurants.get(offer.restaurant), pizzas.get(offer.pizza)) {
            (Some(restaurant), Some(pizza)) => (restaurant, pizza),
            _ => {
                return Err(Error::Config(format!(
                    "seed offer points past the seeded rows: {:?}",
                    offer
                )))
            }
        };
        let new = NewRestaurantPizza {
            price: offer.price,
            restaurant_id: restaurant.id,
            pizza_id: pizza.id,
        };
        query::create_restaurant_pizza(&new, conn)?;
    }
    log::info!(
        "seeded {} restaurants, {} pizzas, {} restaurant_pizzas",
        restaurants.len(),
        pizzas.len(),
        data.offers.len()
    );
    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env()?;
    let pool = config.build_pool()?;
    let conn = pool.get()?;

    if query::find_all_restaurants(&conn)?.is_empty() {
        log::info!("no restaurants found, seeding");
        seed(&conn)?;
    }

    for restaurant in query::find_all_restaurants(&conn)? {
        let detail = query::find_restaurant(restaurant.id, &conn)?;
        println!("{}", Value::Object(to_document(&detail, &FieldFilter::all())));
    }

    let listing = [RESTAURANT_PIZZAS];
    for pizza in query::find_all_pizzas(&conn)? {
        let detail = query::find_pizza(pizza.id, &conn)?;
        let document = to_document(&detail, &FieldFilter::exclude(&listing));
        println!("{}", Value::Object(document));
    }
    Ok(())
}
