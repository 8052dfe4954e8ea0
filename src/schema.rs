table! {
    restaurants (id) {
        id -> Integer,
        name -> Varchar,
        address -> Varchar,
    }
}

table! {
    pizzas (id) {
        id -> Integer,
        name -> Varchar,
        ingredients -> Varchar,
    }
}

table! {
    restaurant_pizzas (id) {
        id -> Integer,
        price -> Integer,
        restaurant_id -> Integer, //foreign key
        pizza_id -> Integer,      //foreign key
    }
}

joinable!(restaurant_pizzas -> restaurants (restaurant_id));
joinable!(restaurant_pizzas -> pizzas (pizza_id));

allow_tables_to_appear_in_same_query!(restaurants, pizzas, restaurant_pizzas);
