use crate::error::Error;
use crate::models::{
    NewPizza, NewRestaurant, NewRestaurantPizza, Pizza, PizzaDetail, Restaurant, RestaurantDetail,
    RestaurantPizza, RestaurantPizzaDetail,
};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};
use crate::validation::validate_price;
use diesel::prelude::*;

no_arg_sql_function!(
    last_insert_id,
    diesel::sql_types::Unsigned<diesel::sql_types::BigInt>
);

//mysql has no RETURNING, LAST_INSERT_ID() is per connection
fn inserted_id(conn: &MysqlConnection) -> Result<i32, Error> {
    let id: u64 = diesel::select(last_insert_id).get_result(conn)?;
    row_id(id)
}

fn row_id(raw: u64) -> Result<i32, Error> {
    i32::try_from(raw).map_err(|_| Error::IdOutOfRange(raw))
}

pub fn find_all_restaurants(conn: &MysqlConnection) -> Result<Vec<Restaurant>, Error> {
    Ok(restaurants::table
        .order(restaurants::id.asc())
        .load::<Restaurant>(conn)?)
}

pub fn find_all_pizzas(conn: &MysqlConnection) -> Result<Vec<Pizza>, Error> {
    Ok(pizzas::table.order(pizzas::id.asc()).load::<Pizza>(conn)?)
}

fn get_restaurant(restaurant_id: i32, conn: &MysqlConnection) -> Result<Restaurant, Error> {
    restaurants::table
        .find(restaurant_id)
        .first::<Restaurant>(conn)
        .optional()?
        .ok_or(Error::NotFound {
            entity: "restaurant",
            id: restaurant_id,
        })
}

fn get_pizza(pizza_id: i32, conn: &MysqlConnection) -> Result<Pizza, Error> {
    pizzas::table
        .find(pizza_id)
        .first::<Pizza>(conn)
        .optional()?
        .ok_or(Error::NotFound {
            entity: "pizza",
            id: pizza_id,
        })
}

/// Loads a restaurant with every association and the pizza each one offers.
pub fn find_restaurant(restaurant_id: i32, conn: &MysqlConnection) -> Result<RestaurantDetail, Error> {
    let restaurant = get_restaurant(restaurant_id, conn)?;
    let rows = restaurant_pizzas::table
        .inner_join(pizzas::table)
        .filter(restaurant_pizzas::restaurant_id.eq(restaurant.id))
        .order(restaurant_pizzas::id.asc())
        .load::<(RestaurantPizza, Pizza)>(conn)?;

    let restaurant_pizzas = rows
        .into_iter()
        .map(|(restaurant_pizza, pizza)| RestaurantPizzaDetail {
            restaurant_pizza,
            restaurant: restaurant.clone(),
            pizza,
        })
        .collect();
    Ok(RestaurantDetail {
        restaurant,
        restaurant_pizzas,
    })
}

/// Loads a pizza with every association and the restaurant offering it.
pub fn find_pizza(pizza_id: i32, conn: &MysqlConnection) -> Result<PizzaDetail, Error> {
    let pizza = get_pizza(pizza_id, conn)?;
    let rows = restaurant_pizzas::table
        .inner_join(restaurants::table)
        .filter(restaurant_pizzas::pizza_id.eq(pizza.id))
        .order(restaurant_pizzas::id.asc())
        .load::<(RestaurantPizza, Restaurant)>(conn)?;

    let restaurant_pizzas = rows
        .into_iter()
        .map(|(restaurant_pizza, restaurant)| RestaurantPizzaDetail {
            restaurant_pizza,
            restaurant,
            pizza: pizza.clone(),
        })
        .collect();
    Ok(PizzaDetail {
        pizza,
        restaurant_pizzas,
    })
}

pub fn find_restaurant_pizza(
    restaurant_pizza_id: i32,
    conn: &MysqlConnection,
) -> Result<RestaurantPizzaDetail, Error> {
    let (restaurant_pizza, restaurant, pizza) = restaurant_pizzas::table
        .inner_join(restaurants::table)
        .inner_join(pizzas::table)
        .filter(restaurant_pizzas::id.eq(restaurant_pizza_id))
        .first::<(RestaurantPizza, Restaurant, Pizza)>(conn)
        .optional()?
        .ok_or(Error::NotFound {
            entity: "restaurant_pizza",
            id: restaurant_pizza_id,
        })?;
    Ok(RestaurantPizzaDetail {
        restaurant_pizza,
        restaurant,
        pizza,
    })
}

pub fn create_restaurant(new: &NewRestaurant, conn: &MysqlConnection) -> Result<Restaurant, Error> {
    conn.transaction::<_, Error, _>(|| {
        diesel::insert_into(restaurants::table)
            .values(new)
            .execute(conn)?;
        let restaurant = get_restaurant(inserted_id(conn)?, conn)?;
        log::info!("created restaurant {} ({})", restaurant.id, restaurant.name);
        Ok(restaurant)
    })
}

pub fn create_pizza(new: &NewPizza, conn: &MysqlConnection) -> Result<Pizza, Error> {
    conn.transaction::<_, Error, _>(|| {
        diesel::insert_into(pizzas::table).values(new).execute(conn)?;
        let pizza = get_pizza(inserted_id(conn)?, conn)?;
        log::info!("created pizza {} ({})", pizza.id, pizza.name);
        Ok(pizza)
    })
}

/// Offers a pizza at a restaurant. The price is checked inside the insert's
/// transaction; both parents must exist.
pub fn create_restaurant_pizza(
    new: &NewRestaurantPizza,
    conn: &MysqlConnection,
) -> Result<RestaurantPizzaDetail, Error> {
    conn.transaction::<_, Error, _>(|| {
        validate_price(new.price)?;
        let restaurant = get_restaurant(new.restaurant_id, conn)?;
        let pizza = get_pizza(new.pizza_id, conn)?;

        diesel::insert_into(restaurant_pizzas::table)
            .values(new)
            .execute(conn)?;
        let restaurant_pizza = restaurant_pizzas::table
            .find(inserted_id(conn)?)
            .first::<RestaurantPizza>(conn)?;
        log::info!(
            "restaurant {} now offers pizza {} at {}",
            restaurant.id,
            pizza.id,
            restaurant_pizza.price
        );
        Ok(RestaurantPizzaDetail {
            restaurant_pizza,
            restaurant,
            pizza,
        })
    })
}

/// Changes the price of an existing association. The row is locked before
/// the new price is checked and written.
pub fn update_price(
    restaurant_pizza_id: i32,
    price: i32,
    conn: &MysqlConnection,
) -> Result<RestaurantPizza, Error> {
    conn.transaction::<_, Error, _>(|| {
        let current = restaurant_pizzas::table
            .find(restaurant_pizza_id)
            .for_update()
            .get_result::<RestaurantPizza>(conn)
            .optional()?
            .ok_or(Error::NotFound {
                entity: "restaurant_pizza",
                id: restaurant_pizza_id,
            })?;
        let price = validate_price(price)?;

        diesel::update(&current)
            .set(restaurant_pizzas::price.eq(price))
            .execute(conn)?;
        log::debug!(
            "restaurant_pizza {} price {} -> {}",
            current.id,
            current.price,
            price
        );
        Ok(RestaurantPizza { price, ..current })
    })
}

/// Deletes a restaurant and all of its associations. Pizzas are kept.
/// Returns the number of associations removed.
pub fn delete_restaurant(restaurant_id: i32, conn: &MysqlConnection) -> Result<usize, Error> {
    conn.transaction::<_, Error, _>(|| {
        let restaurant = get_restaurant(restaurant_id, conn)?;
        let removed = diesel::delete(RestaurantPizza::belonging_to(&restaurant)).execute(conn)?;
        diesel::delete(&restaurant).execute(conn)?;
        log::info!(
            "deleted restaurant {} and {} restaurant_pizzas",
            restaurant.id,
            removed
        );
        Ok(removed)
    })
}

/// Deletes a pizza and all of its associations. Restaurants are kept.
/// Returns the number of associations removed.
pub fn delete_pizza(pizza_id: i32, conn: &MysqlConnection) -> Result<usize, Error> {
    conn.transaction::<_, Error, _>(|| {
        let pizza = get_pizza(pizza_id, conn)?;
        let removed = diesel::delete(RestaurantPizza::belonging_to(&pizza)).execute(conn)?;
        diesel::delete(&pizza).execute(conn)?;
        log::info!("deleted pizza {} and {} restaurant_pizzas", pizza.id, removed);
        Ok(removed)
    })
}

pub fn delete_restaurant_pizza(restaurant_pizza_id: i32, conn: &MysqlConnection) -> Result<(), Error> {
    let deleted = diesel::delete(restaurant_pizzas::table.find(restaurant_pizza_id)).execute(conn)?;
    if deleted == 0 {
        return Err(Error::NotFound {
            entity: "restaurant_pizza",
            id: restaurant_pizza_id,
        });
    }
    log::info!("deleted restaurant_pizza {}", restaurant_pizza_id);
    Ok(())
}
