// Copyright (c) 2022 MASSA LABS <info@massa.net>

mod account_state;
mod store;
