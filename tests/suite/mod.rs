mod lifecycle;
mod propagation;
mod sanitize;
