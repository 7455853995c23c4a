//! Walks one table through the storefront: browse the restored menu, fill the
//! cart with a few spice variants, rework them, check out and serve.

use kavya_cart::config::AppConfig;
use kavya_cart::framework::ActorClient;
use kavya_cart::lifecycle::{setup_tracing, RestaurantSystem};
use kavya_cart::model::{MenuItem, MenuItemCreate, OrderType, SpiceLevel};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = AppConfig::load().map_err(|e| e.to_string())?;
    config.validate().map_err(|e| e.to_string())?;
    info!(?config, "Configuration loaded");

    let system = RestaurantSystem::new(&config)
        .await
        .map_err(|e| e.to_string())?;
    let cart = system.cart_id;

    let menu = system.menu_client.list().await.map_err(|e| e.to_string())?;
    let categories = system.menu_client.categories().await.map_err(|e| e.to_string())?;
    info!(items = menu.len(), ?categories, "Menu ready");

    let span = tracing::info_span!("cart");
    async {
        let find = |name: &str| -> Result<MenuItem, String> {
            menu.iter()
                .find(|item| item.name == name)
                .cloned()
                .ok_or_else(|| format!("{name} is not on the menu"))
        };
        let tikka = find("Paneer Tikka")?;
        let lassi = find("Mango Lassi")?;
        // today's special, added once and kept by the menu store
        let biryani = match find("Veg Biryani") {
            Ok(item) => item,
            Err(_) => {
                let id = system
                    .menu_client
                    .create_item(MenuItemCreate::new("Veg Biryani", 180.0, "Main Course"))
                    .await?;
                system.menu_client.get(id).await?.ok_or("Veg Biryani missing")?
            }
        };

        let carts = &system.cart_client;
        carts.add_to_cart(cart, &tikka, Some(SpiceLevel::Mild)).await?;
        carts.add_to_cart(cart, &tikka, Some(SpiceLevel::Mild)).await?;
        carts.add_to_cart(cart, &tikka, Some(SpiceLevel::Hot)).await?;
        carts.add_to_cart(cart, &biryani, None).await?;
        carts.add_to_cart(cart, &lassi, None).await?;
        let notifying = carts.is_notifying(cart).await?;
        info!(notifying, "Items added");

        // mild(2) folds into hot(1)
        let change = carts
            .update_spice_level(cart, tikka.id, SpiceLevel::Mild, SpiceLevel::Hot)
            .await?;
        info!(?change, "Tikka made hot");

        carts.update_quantity(cart, biryani.id, 2).await?;
        carts.remove_from_cart(cart, lassi.id).await?;

        let lines = carts.items(cart).await?.len();
        let total_items = carts.total_items(cart).await?;
        let total_price = carts.total_price(cart).await?;
        info!(lines, total_items, total_price, "Cart ready");
        Ok::<_, Box<dyn std::error::Error + Send + Sync>>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("order_processing");
    let order_result = async {
        let order_id = system.order_client.checkout(cart, OrderType::DineIn).await?;
        system.order_client.advance(order_id).await?;
        system.order_client.advance(order_id).await?;
        Ok::<_, kavya_cart::order_actor::OrderError>(order_id)
    }
    .instrument(span)
    .await;

    match order_result {
        Ok(order_id) => info!(%order_id, "Order served"),
        Err(e) => error!(error = %e, "Order processing failed"),
    }

    let stats = system.order_client.dashboard().await.map_err(|e| e.to_string())?;
    info!(?stats, "Dashboard");

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
